//! Pluggable mechanisms for choosing the next candidate sequence.

use std::fmt;

use docseq_domain::SequenceScope;

use crate::{query::SequenceQuery, DocumentStore, StoreError};

/// Decides which sequence the allocator tries next in a scope.
///
/// The allocator's loop, formatting and commit handling are the same for every
/// strategy; only candidate selection and the need for a pre-commit conflict
/// check differ.
pub trait SequenceStrategy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn candidate(&self, store: &dyn DocumentStore, scope: &SequenceScope) -> Result<u32, StoreError>;

    /// Whether a candidate must be checked against existing documents before
    /// the commit is attempted.
    fn requires_conflict_check(&self) -> bool;
}

/// Reads the highest issued sequence and proposes the next one.
///
/// Concurrent callers may read the same value; the conflict check and the
/// store's uniqueness constraint turn that into a retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimisticRetry;

impl SequenceStrategy for OptimisticRetry {
    fn name(&self) -> &'static str {
        "optimistic_retry"
    }

    fn candidate(&self, store: &dyn DocumentStore, scope: &SequenceScope) -> Result<u32, StoreError> {
        Ok(SequenceQuery::highest_sequence(store, scope)?.saturating_add(1))
    }

    fn requires_conflict_check(&self) -> bool {
        true
    }
}

/// Takes the next value from the store's per-scope counter.
///
/// Two callers never receive the same value, so no conflict check is made;
/// the commit still runs through the uniqueness constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicCounter;

impl SequenceStrategy for AtomicCounter {
    fn name(&self) -> &'static str {
        "atomic_counter"
    }

    fn candidate(&self, store: &dyn DocumentStore, scope: &SequenceScope) -> Result<u32, StoreError> {
        store.next_counter(scope)
    }

    fn requires_conflict_check(&self) -> bool {
        false
    }
}
