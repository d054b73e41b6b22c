//! Persisted financial documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::{Category, DocumentKind},
    number::DocumentNumber,
    scope::SequenceScope,
};

/// A numbered transaction or invoice.
///
/// `financial_year` and `document_number` are written as `financialYear` and
/// `documentNumber`; together with the kind's prefix they form the
/// uniqueness key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<String>,
    pub document_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(draft: DocumentDraft, number: &DocumentNumber, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            financial_year: number.fiscal_year.clone(),
            document_number: number.formatted.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Scope the stored number is unique within.
    pub fn scope(&self) -> SequenceScope {
        SequenceScope::new(self.kind.prefix(), self.financial_year.clone())
    }

    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }

    /// Replaces the stored number, discarding the previous one.
    pub fn assign_number(&mut self, number: &DocumentNumber) {
        self.financial_year = number.fiscal_year.clone();
        self.document_number = number.formatted.clone();
    }
}

/// Caller-supplied fields for a document that has not been numbered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub kind: DocumentKind,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl DocumentDraft {
    pub fn new(kind: DocumentKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            description: String::new(),
            amount: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}

/// Field changes applied when editing a transaction. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionEdit {
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

impl TransactionEdit {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_number() -> DocumentNumber {
        DocumentNumber {
            prefix: "INC-".into(),
            fiscal_year: Some("2024-2025".into()),
            sequence: 7,
            formatted: "INC-007".into(),
        }
    }

    #[test]
    fn persisted_fields_use_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let draft = DocumentDraft::new(DocumentKind::Transaction(Category::Income), date)
            .with_description("Consulting")
            .with_amount(1200.0);
        let document = Document::new(draft, &sample_number(), Utc::now());

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["financialYear"], "2024-2025");
        assert_eq!(value["documentNumber"], "INC-007");
        assert_eq!(value["kind"]["transaction"], "INCOME");
    }

    #[test]
    fn document_scope_follows_kind_prefix() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let draft = DocumentDraft::new(DocumentKind::Transaction(Category::Income), date);
        let document = Document::new(draft, &sample_number(), Utc::now());
        assert_eq!(document.scope(), sample_number().scope());
    }
}
