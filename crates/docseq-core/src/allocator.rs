//! Retrying allocation of unique document numbers.

use std::{sync::Arc, thread, time::Duration};

use chrono::NaiveDate;
use docseq_domain::{
    Category, DocumentKind, DocumentNumber, OverflowPolicy, SequenceScope, DEFAULT_SEQUENCE_WIDTH,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    cancel::CancellationToken,
    format::NumberFormatter,
    strategy::{OptimisticRetry, SequenceStrategy},
    AllocationError, DocumentStore, StoreError,
};

/// Attempts made before an allocation gives up.
pub const MAX_ATTEMPTS: u32 = 20;

/// Pause between a rejected candidate and the next read.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(100);

/// Widest pad the formatter accepts; `u32` sequences have at most ten digits.
pub const MAX_SEQUENCE_WIDTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorSettings {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub sequence_width: usize,
    pub overflow: OverflowPolicy,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            sequence_width: DEFAULT_SEQUENCE_WIDTH,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl AllocatorSettings {
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.max_attempts == 0 {
            return Err(AllocationError::Validation(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.sequence_width == 0 || self.sequence_width > MAX_SEQUENCE_WIDTH {
            return Err(AllocationError::Validation(format!(
                "sequence_width must be between 1 and {MAX_SEQUENCE_WIDTH}"
            )));
        }
        Ok(())
    }
}

/// How one attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Claimed,
    /// Another document already held the candidate.
    Conflict,
    /// The commit hit the store's uniqueness constraint.
    CommitRejected,
}

/// One pass through the allocation loop. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationAttempt {
    pub candidate: String,
    pub attempt_index: u32,
    pub outcome: AttemptOutcome,
}

/// A claimed number together with whatever the commit hook produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocated<T> {
    pub number: DocumentNumber,
    pub value: T,
    pub attempts: u32,
}

/// Assigns document numbers without holding any lock across callers.
///
/// Each attempt asks the strategy for a candidate, formats it, optionally
/// checks it against existing documents, and hands it to the caller's commit.
/// A conflict or a [`StoreError::Duplicate`] from the commit costs one
/// attempt and a backoff; every other store failure ends the allocation.
pub struct SequenceAllocator {
    store: Arc<dyn DocumentStore>,
    strategy: Box<dyn SequenceStrategy>,
    formatter: NumberFormatter,
    settings: AllocatorSettings,
}

impl SequenceAllocator {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        strategy: Box<dyn SequenceStrategy>,
        settings: AllocatorSettings,
    ) -> Result<Self, AllocationError> {
        settings.validate()?;
        Ok(Self {
            store,
            strategy,
            formatter: NumberFormatter::new(settings.sequence_width),
            settings,
        })
    }

    /// Optimistic retry with default settings.
    pub fn optimistic(store: Arc<dyn DocumentStore>) -> Self {
        let settings = AllocatorSettings::default();
        Self {
            store,
            strategy: Box::new(OptimisticRetry),
            formatter: NumberFormatter::new(settings.sequence_width),
            settings,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn settings(&self) -> &AllocatorSettings {
        &self.settings
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Allocates a transaction number in the category's prefix and the
    /// fiscal year of `date`. `exclude` names a document being renumbered in
    /// place so its own current number does not count as a conflict.
    pub fn allocate(
        &self,
        category: Option<Category>,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<DocumentNumber, AllocationError> {
        let category = category.ok_or_else(|| {
            AllocationError::Validation("a transaction needs an INCOME or EXPENSE category".into())
        })?;
        self.allocate_in(DocumentKind::Transaction(category), date, exclude, None)
    }

    /// Allocates the next number in the global invoice sequence.
    pub fn allocate_invoice(&self, date: NaiveDate) -> Result<DocumentNumber, AllocationError> {
        self.allocate_in(DocumentKind::Invoice, date, None, None)
    }

    pub fn allocate_in(
        &self,
        kind: DocumentKind,
        date: NaiveDate,
        exclude: Option<Uuid>,
        cancel: Option<&CancellationToken>,
    ) -> Result<DocumentNumber, AllocationError> {
        self.allocate_with(kind, date, exclude, cancel, |_| Ok(()))
            .map(|allocated| allocated.number)
    }

    /// Runs the allocation loop and persists through `commit`.
    ///
    /// `commit` must write the document in a single store operation that
    /// enforces number uniqueness; that write is what actually claims the
    /// number.
    pub fn allocate_with<T, F>(
        &self,
        kind: DocumentKind,
        date: NaiveDate,
        exclude: Option<Uuid>,
        cancel: Option<&CancellationToken>,
        mut commit: F,
    ) -> Result<Allocated<T>, AllocationError>
    where
        F: FnMut(&DocumentNumber) -> Result<T, StoreError>,
    {
        let scope = SequenceScope::for_document(kind, date);
        let max_attempts = self.settings.max_attempts;

        for attempt_index in 1..=max_attempts {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(AllocationError::Cancelled {
                    scope,
                    attempts: attempt_index - 1,
                });
            }

            let sequence = self.strategy.candidate(self.store.as_ref(), &scope)?;
            let number = self.number_for(&scope, sequence)?;

            let conflict = self.strategy.requires_conflict_check()
                && self
                    .store
                    .number_taken(&scope, &number.formatted, exclude)?;

            let outcome = if conflict {
                AttemptOutcome::Conflict
            } else {
                match commit(&number) {
                    Ok(value) => {
                        let attempt = AllocationAttempt {
                            candidate: number.formatted.clone(),
                            attempt_index,
                            outcome: AttemptOutcome::Claimed,
                        };
                        debug!(
                            scope = %scope,
                            strategy = self.strategy.name(),
                            attempt = ?attempt,
                            "document number claimed"
                        );
                        return Ok(Allocated {
                            number,
                            value,
                            attempts: attempt_index,
                        });
                    }
                    Err(StoreError::Duplicate { .. }) => AttemptOutcome::CommitRejected,
                    Err(err) => return Err(AllocationError::StoreUnavailable(err)),
                }
            };

            let attempt = AllocationAttempt {
                candidate: number.formatted,
                attempt_index,
                outcome,
            };
            debug!(
                scope = %scope,
                strategy = self.strategy.name(),
                attempt = ?attempt,
                "document number candidate rejected"
            );

            if attempt_index < max_attempts && !self.settings.backoff.is_zero() {
                thread::sleep(self.settings.backoff);
            }
        }

        warn!(
            scope = %scope,
            attempts = max_attempts,
            "could not generate a unique document number"
        );
        Err(AllocationError::ConflictExhausted {
            scope,
            attempts: max_attempts,
        })
    }

    fn number_for(
        &self,
        scope: &SequenceScope,
        sequence: u32,
    ) -> Result<DocumentNumber, AllocationError> {
        if self.settings.overflow == OverflowPolicy::Reject && !self.formatter.fits(sequence) {
            return Err(AllocationError::Overflow {
                prefix: scope.prefix.clone(),
                sequence,
                width: self.formatter.width(),
            });
        }
        Ok(self.formatter.number(scope, sequence))
    }
}
