//! Document workflows that consume the allocator.

use std::sync::Arc;

use docseq_domain::{Category, Document, DocumentDraft, DocumentKind, TransactionEdit};
use tracing::info;
use uuid::Uuid;

use crate::{
    cancel::CancellationToken,
    error::{CoreError, CoreResult},
    time::Clock,
    SequenceAllocator,
};

/// Creates and edits numbered documents.
///
/// Every write that carries a freshly allocated number goes through the
/// allocator's commit hook, so the store's uniqueness constraint and the
/// retry loop guard the same write.
pub struct DocumentService {
    allocator: SequenceAllocator,
    clock: Arc<dyn Clock>,
}

impl DocumentService {
    pub fn new(allocator: SequenceAllocator, clock: Arc<dyn Clock>) -> Self {
        Self { allocator, clock }
    }

    pub fn allocator(&self) -> &SequenceAllocator {
        &self.allocator
    }

    /// Numbers and persists a new transaction or invoice.
    pub fn create(&self, draft: DocumentDraft) -> CoreResult<Document> {
        self.create_cancellable(draft, None)
    }

    pub fn create_cancellable(
        &self,
        draft: DocumentDraft,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<Document> {
        validate_amount(draft.amount)?;
        let now = self.clock.now();
        let store = Arc::clone(self.allocator.store());
        let kind = draft.kind;
        let date = draft.date;

        let allocated = self
            .allocator
            .allocate_with(kind, date, None, cancel, |number| {
                let document = Document::new(draft.clone(), number, now);
                store.insert(&document)?;
                Ok(document)
            })?;

        info!(
            id = %allocated.value.id,
            number = %allocated.number,
            attempts = allocated.attempts,
            "document created"
        );
        Ok(allocated.value)
    }

    /// Applies `edit` to a stored document.
    ///
    /// The number is reallocated only when a transaction's category flips
    /// between INCOME and EXPENSE. Any other edit, including a date change
    /// across fiscal years, keeps the stored number byte for byte.
    pub fn update(&self, id: Uuid, edit: TransactionEdit) -> CoreResult<Document> {
        self.update_cancellable(id, edit, None)
    }

    pub fn update_cancellable(
        &self,
        id: Uuid,
        edit: TransactionEdit,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<Document> {
        let store = Arc::clone(self.allocator.store());
        let current = store.get(id)?.ok_or(CoreError::DocumentNotFound(id))?;
        if edit.is_empty() {
            return Ok(current);
        }
        if let Some(amount) = edit.amount {
            validate_amount(amount)?;
        }

        let mut next = current.clone();
        if let Some(date) = edit.date {
            next.date = date;
        }
        if let Some(description) = edit.description {
            next.description = description;
        }
        if let Some(amount) = edit.amount {
            next.amount = amount;
        }
        next.updated_at = self.clock.now();

        let new_category = match (current.kind, edit.category) {
            (DocumentKind::Invoice, Some(_)) => {
                return Err(CoreError::InvalidOperation(
                    "invoices have no category to change".into(),
                ))
            }
            (DocumentKind::Transaction(previous), Some(category)) if category != previous => {
                Some(category)
            }
            _ => None,
        };

        let Some(category) = new_category else {
            store.update(&next)?;
            return Ok(next);
        };

        next.kind = DocumentKind::Transaction(category);
        let allocated =
            self.allocator
                .allocate_with(next.kind, next.date, Some(id), cancel, |number| {
                    let mut renumbered = next.clone();
                    renumbered.assign_number(number);
                    store.update(&renumbered)?;
                    Ok(renumbered)
                })?;

        info!(
            id = %id,
            previous = %current.document_number,
            number = %allocated.number,
            "transaction renumbered after category change"
        );
        Ok(allocated.value)
    }

    pub fn get(&self, id: Uuid) -> CoreResult<Document> {
        self.allocator
            .store()
            .get(id)?
            .ok_or(CoreError::DocumentNotFound(id))
    }

    /// All documents, oldest first.
    pub fn list(&self) -> CoreResult<Vec<Document>> {
        let mut documents = self.allocator.store().list()?;
        documents.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.document_number.cmp(&b.document_number))
        });
        Ok(documents)
    }

    /// Transactions of one category, oldest first.
    pub fn list_category(&self, category: Category) -> CoreResult<Vec<Document>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|document| document.category() == Some(category))
            .collect())
    }
}

fn validate_amount(amount: f64) -> CoreResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation("amount must be a finite number".into()))
    }
}
