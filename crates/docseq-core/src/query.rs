use docseq_domain::SequenceScope;

use crate::{DocumentStore, StoreError};

/// Reads the highest sequence already assigned in a scope.
pub struct SequenceQuery;

impl SequenceQuery {
    /// Performs one read. Returns `0` for an empty scope; numbers whose
    /// suffix does not parse are not counted.
    pub fn highest_sequence(
        store: &dyn DocumentStore,
        scope: &SequenceScope,
    ) -> Result<u32, StoreError> {
        store.highest_sequence(scope)
    }
}
