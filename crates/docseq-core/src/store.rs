use std::collections::BTreeMap;

use docseq_domain::{Document, SequenceScope};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{format::parse_sequence, StoreError};

/// Capability contract the allocator and document workflows need from persistence.
///
/// Every method is one atomic step against the store. `insert` and `update`
/// enforce the uniqueness constraint on `(prefix, fiscal year, sequence)` and
/// report a collision as [`StoreError::Duplicate`]. Numbers are compared by
/// their parsed sequence, so `INC-002` and `INC-00002` collide.
pub trait DocumentStore: Send + Sync {
    /// Greatest sequence ever issued in `scope`, including numbers later
    /// vacated by renumbering. `0` when nothing parsable was issued.
    fn highest_sequence(&self, scope: &SequenceScope) -> Result<u32, StoreError>;

    /// Returns `true` when a document other than `exclude` holds `formatted`,
    /// or another rendering of the same sequence, in `scope`.
    fn number_taken(
        &self,
        scope: &SequenceScope,
        formatted: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError>;

    fn insert(&self, document: &Document) -> Result<(), StoreError>;

    fn update(&self, document: &Document) -> Result<(), StoreError>;

    /// Fetch-and-increment on the per-scope counter. The counter never falls
    /// below the highest issued number.
    fn next_counter(&self, scope: &SequenceScope) -> Result<u32, StoreError>;

    fn get(&self, id: Uuid) -> Result<Option<Document>, StoreError>;

    fn list(&self) -> Result<Vec<Document>, StoreError>;
}

/// Complete store state: documents, per-scope high-water marks and counters.
///
/// Shared by the in-memory and file-backed stores, which wrap it in their own
/// critical sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSet {
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Greatest sequence ever written, keyed by [`SequenceScope::key`].
    #[serde(default)]
    pub issued: BTreeMap<String, u32>,
    #[serde(default)]
    pub counters: BTreeMap<String, u32>,
}

impl DocumentSet {
    pub fn highest_sequence(&self, scope: &SequenceScope) -> u32 {
        self.documents
            .iter()
            .filter(|document| document.scope() == *scope)
            .filter_map(|document| parse_sequence(&scope.prefix, &document.document_number))
            .chain(self.issued.get(&scope.key()).copied())
            .max()
            .unwrap_or(0)
    }

    pub fn number_taken(&self, scope: &SequenceScope, formatted: &str, exclude: Option<Uuid>) -> bool {
        let sequence = parse_sequence(&scope.prefix, formatted);
        self.documents.iter().any(|document| {
            Some(document.id) != exclude
                && document.scope() == *scope
                && (document.document_number == formatted
                    || (sequence.is_some()
                        && parse_sequence(&scope.prefix, &document.document_number) == sequence))
        })
    }

    pub fn insert(&mut self, document: Document) -> Result<(), StoreError> {
        if self.documents.iter().any(|existing| existing.id == document.id) {
            return Err(StoreError::AlreadyExists(document.id));
        }
        let scope = document.scope();
        if self.number_taken(&scope, &document.document_number, None) {
            return Err(StoreError::Duplicate {
                scope,
                number: document.document_number,
            });
        }
        self.record_issued(&scope, &document.document_number);
        self.documents.push(document);
        Ok(())
    }

    pub fn update(&mut self, document: Document) -> Result<(), StoreError> {
        let scope = document.scope();
        if self.number_taken(&scope, &document.document_number, Some(document.id)) {
            return Err(StoreError::Duplicate {
                scope,
                number: document.document_number,
            });
        }
        let slot = self
            .documents
            .iter_mut()
            .find(|existing| existing.id == document.id)
            .ok_or(StoreError::NotFound(document.id))?;
        let number = document.document_number.clone();
        *slot = document;
        self.record_issued(&scope, &number);
        Ok(())
    }

    pub fn next_counter(&mut self, scope: &SequenceScope) -> Result<u32, StoreError> {
        let floor = self.highest_sequence(scope);
        let counter = self.counters.entry(scope.key()).or_insert(0);
        let next = (*counter).max(floor).checked_add(1).ok_or_else(|| {
            StoreError::Unavailable(format!("sequence counter for {scope} is exhausted"))
        })?;
        *counter = next;
        Ok(next)
    }

    pub fn get(&self, id: Uuid) -> Option<&Document> {
        self.documents.iter().find(|document| document.id == id)
    }

    fn record_issued(&mut self, scope: &SequenceScope, number: &str) {
        let Some(sequence) = parse_sequence(&scope.prefix, number) else {
            return;
        };
        let mark = self.issued.entry(scope.key()).or_insert(0);
        *mark = (*mark).max(sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use docseq_domain::{Category, DocumentDraft, DocumentKind, DocumentNumber};

    fn document(kind: DocumentKind, formatted: &str, fiscal_year: Option<&str>) -> Document {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let number = DocumentNumber {
            prefix: kind.prefix().into(),
            fiscal_year: fiscal_year.map(Into::into),
            sequence: parse_sequence(kind.prefix(), formatted).unwrap_or(0),
            formatted: formatted.into(),
        };
        Document::new(DocumentDraft::new(kind, date), &number, Utc::now())
    }

    fn income_scope() -> SequenceScope {
        SequenceScope::new("INC-", Some("2024-2025".into()))
    }

    #[test]
    fn insert_rejects_duplicate_number_in_scope() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-001", Some("2024-2025")))
            .expect("first insert");

        let err = set
            .insert(document(income, "INC-001", Some("2024-2025")))
            .expect_err("duplicate must fail");
        assert!(matches!(err, StoreError::Duplicate { ref number, .. } if number == "INC-001"));

        set.insert(document(income, "INC-001", Some("2025-2026")))
            .expect("other fiscal year is a separate scope");
    }

    #[test]
    fn highest_sequence_orders_widened_numbers_numerically() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-999", Some("2024-2025"))).unwrap();
        set.insert(document(income, "INC-1000", Some("2024-2025"))).unwrap();
        assert_eq!(set.highest_sequence(&income_scope()), 1000);
    }

    #[test]
    fn highest_sequence_ignores_padding_width() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-00001", Some("2024-2025"))).unwrap();
        set.insert(document(income, "INC-002", Some("2024-2025"))).unwrap();
        assert_eq!(set.highest_sequence(&income_scope()), 2);
    }

    #[test]
    fn same_sequence_with_other_padding_is_a_duplicate() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-002", Some("2024-2025"))).unwrap();

        assert!(set.number_taken(&income_scope(), "INC-00002", None));
        let err = set
            .insert(document(income, "INC-00002", Some("2024-2025")))
            .expect_err("same sequence, wider rendering");
        assert!(matches!(err, StoreError::Duplicate { ref number, .. } if number == "INC-00002"));
    }

    #[test]
    fn unparsable_numbers_do_not_raise_the_sequence() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-legacy", Some("2024-2025"))).unwrap();
        assert_eq!(set.highest_sequence(&income_scope()), 0);
        assert!(set.number_taken(&income_scope(), "INC-legacy", None));
        assert!(!set.number_taken(&income_scope(), "INC-001", None));
    }

    #[test]
    fn vacated_numbers_stay_issued() {
        let expense = DocumentKind::Transaction(Category::Expense);
        let mut set = DocumentSet::default();
        let mut moved = document(expense, "EXP-003", Some("2024-2025"));
        set.insert(moved.clone()).unwrap();

        moved.kind = DocumentKind::Transaction(Category::Income);
        moved.document_number = "INC-001".into();
        set.update(moved).unwrap();

        let expense_scope = SequenceScope::new("EXP-", Some("2024-2025".into()));
        assert!(!set.number_taken(&expense_scope, "EXP-003", None));
        assert_eq!(set.highest_sequence(&expense_scope), 3);
    }

    #[test]
    fn update_ignores_its_own_number() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        let mut doc = document(income, "INC-001", Some("2024-2025"));
        set.insert(doc.clone()).unwrap();
        doc.description = "edited".into();
        set.update(doc.clone()).expect("same number is not a conflict");
        assert_eq!(set.get(doc.id).unwrap().description, "edited");
    }

    #[test]
    fn update_of_unknown_document_fails() {
        let mut set = DocumentSet::default();
        let doc = document(DocumentKind::Invoice, "INV-001", None);
        let err = set.update(doc).expect_err("unknown document");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn counter_starts_above_existing_numbers() {
        let income = DocumentKind::Transaction(Category::Income);
        let mut set = DocumentSet::default();
        set.insert(document(income, "INC-004", Some("2024-2025"))).unwrap();
        assert_eq!(set.next_counter(&income_scope()).unwrap(), 5);
        assert_eq!(set.next_counter(&income_scope()).unwrap(), 6);
    }
}
