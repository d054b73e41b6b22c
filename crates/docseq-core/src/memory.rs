use std::sync::{Mutex, MutexGuard};

use docseq_domain::{Document, SequenceScope};
use uuid::Uuid;

use crate::{store::DocumentSet, DocumentStore, StoreError};

/// Process-local store. One mutex serializes every operation, which makes
/// each trait method atomic the way a single database statement would be.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<DocumentSet>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, DocumentSet>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".into()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn highest_sequence(&self, scope: &SequenceScope) -> Result<u32, StoreError> {
        Ok(self.lock()?.highest_sequence(scope))
    }

    fn number_taken(
        &self,
        scope: &SequenceScope,
        formatted: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        Ok(self.lock()?.number_taken(scope, formatted, exclude))
    }

    fn insert(&self, document: &Document) -> Result<(), StoreError> {
        self.lock()?.insert(document.clone())
    }

    fn update(&self, document: &Document) -> Result<(), StoreError> {
        self.lock()?.update(document.clone())
    }

    fn next_counter(&self, scope: &SequenceScope) -> Result<u32, StoreError> {
        self.lock()?.next_counter(scope)
    }

    fn get(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.lock()?.documents.clone())
    }
}
