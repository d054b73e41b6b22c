use docseq_config::ConfigError;
use docseq_core::{AllocationError, CoreError, StoreError};
use thiserror::Error;

/// Error type for the application layer and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
