//! docseq assigns unique, fiscal-year scoped numbers (`INC-001`, `EXP-042`,
//! `INV-003`) to financial documents and ships a small CLI over a JSON store.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

pub use app::{build_service, AppContext};
pub use docseq_config as config;
pub use docseq_core as core;
pub use docseq_domain as domain;
pub use docseq_storage_json as storage;
pub use errors::AppError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init(verbosity: u8) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(verbosity);
        tracing::debug!("docseq tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init(0);
        super::init(2);
    }
}
