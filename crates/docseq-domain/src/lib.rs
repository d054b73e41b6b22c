//! docseq-domain
//!
//! Pure domain models for sequentially numbered financial documents.
//! No I/O, no storage, no allocation logic. Only data types and the
//! fiscal-year calendar rule.

pub mod category;
pub mod document;
pub mod fiscal_year;
pub mod number;
pub mod scope;

pub use category::*;
pub use document::*;
pub use fiscal_year::*;
pub use number::*;
pub use scope::*;
