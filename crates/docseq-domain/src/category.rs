//! Document categories and the number prefixes they map to.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const INCOME_PREFIX: &str = "INC-";
pub const EXPENSE_PREFIX: &str = "EXP-";
pub const INVOICE_PREFIX: &str = "INV-";

/// Direction of a ledger transaction. Decides the transaction's number prefix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Income => INCOME_PREFIX,
            Category::Expense => EXPENSE_PREFIX,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Income => "INCOME",
            Category::Expense => "EXPENSE",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "inc" => Ok(Category::Income),
            "expense" | "exp" => Ok(Category::Expense),
            other => Err(format!("unknown category `{other}`")),
        }
    }
}

/// The kinds of documents that carry a sequential number.
///
/// Transactions are numbered per category and fiscal year. Invoices share a
/// single global sequence under [`INVOICE_PREFIX`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Transaction(Category),
    Invoice,
}

impl DocumentKind {
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentKind::Transaction(category) => category.prefix(),
            DocumentKind::Invoice => INVOICE_PREFIX,
        }
    }

    pub fn category(self) -> Option<Category> {
        match self {
            DocumentKind::Transaction(category) => Some(category),
            DocumentKind::Invoice => None,
        }
    }

    /// Returns `true` when numbers restart every fiscal year.
    pub fn is_fiscal_scoped(self) -> bool {
        matches!(self, DocumentKind::Transaction(_))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Transaction(category) => write!(f, "{category}"),
            DocumentKind::Invoice => f.write_str("INVOICE"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "invoice" | "inv" => Ok(DocumentKind::Invoice),
            other => other.parse::<Category>().map(DocumentKind::Transaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_to_prefixes() {
        assert_eq!(Category::Income.prefix(), "INC-");
        assert_eq!(Category::Expense.prefix(), "EXP-");
        assert_eq!(DocumentKind::Invoice.prefix(), "INV-");
        assert_eq!(
            DocumentKind::Transaction(Category::Expense).prefix(),
            "EXP-"
        );
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(
            "Income".parse::<DocumentKind>().unwrap(),
            DocumentKind::Transaction(Category::Income)
        );
        assert_eq!("INV".parse::<DocumentKind>().unwrap(), DocumentKind::Invoice);
        assert!("refund".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn category_serializes_in_upper_case() {
        let json = serde_json::to_string(&Category::Expense).unwrap();
        assert_eq!(json, "\"EXPENSE\"");
    }
}
