//! Uniqueness scopes for document numbers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::DocumentKind, fiscal_year::fiscal_year_label};

/// The set of documents within which a formatted number must be unique.
///
/// Invoices carry no fiscal year and share one global scope per prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceScope {
    pub prefix: String,
    pub fiscal_year: Option<String>,
}

impl SequenceScope {
    pub fn new(prefix: impl Into<String>, fiscal_year: Option<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fiscal_year,
        }
    }

    /// Scope a new document of `kind` dated `date` is numbered in.
    pub fn for_document(kind: DocumentKind, date: NaiveDate) -> Self {
        let fiscal_year = kind.is_fiscal_scoped().then(|| fiscal_year_label(date));
        Self::new(kind.prefix(), fiscal_year)
    }

    /// Stable string key, used where scopes index persisted maps.
    pub fn key(&self) -> String {
        match &self.fiscal_year {
            Some(year) => format!("{}{}", self.prefix, year),
            None => self.prefix.clone(),
        }
    }
}

impl fmt::Display for SequenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fiscal_year {
            Some(year) => write!(f, "{} in {}", self.prefix, year),
            None => write!(f, "{} (global)", self.prefix),
        }
    }
}
