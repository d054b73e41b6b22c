//! docseq-core
//!
//! Sequential document numbering: formatting, the store capability,
//! allocation strategies, the allocator and the document workflows that use it.
//! Depends on docseq-domain. No CLI, no terminal I/O, no file handling.

pub mod allocator;
pub mod cancel;
pub mod document_service;
pub mod error;
pub mod format;
pub mod memory;
pub mod query;
pub mod store;
pub mod strategy;
pub mod time;

pub use allocator::*;
pub use cancel::CancellationToken;
pub use document_service::*;
pub use error::{AllocationError, CoreError, CoreResult, StoreError};
pub use format::*;
pub use memory::InMemoryDocumentStore;
pub use query::SequenceQuery;
pub use store::{DocumentSet, DocumentStore};
pub use strategy::*;
pub use time::{Clock, SystemClock};
