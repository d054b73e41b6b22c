use docseq_domain::SequenceScope;
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a [`crate::DocumentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document number {number} is already taken in {scope}")]
    Duplicate {
        scope: SequenceScope,
        number: String,
    },
    #[error("Document already exists: {0}")]
    AlreadyExists(Uuid),
    #[error("Document not found: {0}")]
    NotFound(Uuid),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Reasons an allocation ends without a number.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("could not generate a unique document number for {scope} after {attempts} attempts")]
    ConflictExhausted {
        scope: SequenceScope,
        attempts: u32,
    },
    #[error("Allocation for {scope} cancelled after {attempts} attempts")]
    Cancelled {
        scope: SequenceScope,
        attempts: u32,
    },
    #[error("Sequence {sequence} for {prefix} does not fit in {width} digits")]
    Overflow {
        prefix: String,
        sequence: u32,
        width: usize,
    },
    #[error("Document store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
