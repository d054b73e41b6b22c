//! Allocated document numbers and the rules for rendering them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::scope::SequenceScope;

/// Digits a sequence is zero-padded to, e.g. `INC-007`.
pub const DEFAULT_SEQUENCE_WIDTH: usize = 3;

/// What to do when a sequence needs more digits than the configured width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Render the extra digits (`INC-1000`).
    #[default]
    Widen,
    /// Refuse to allocate past the width.
    Reject,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Widen => f.write_str("widen"),
            OverflowPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "widen" => Ok(OverflowPolicy::Widen),
            "reject" => Ok(OverflowPolicy::Reject),
            other => Err(format!("unknown overflow policy `{other}`")),
        }
    }
}

/// A number assigned to one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DocumentNumber {
    pub prefix: String,
    pub fiscal_year: Option<String>,
    pub sequence: u32,
    pub formatted: String,
}

impl DocumentNumber {
    pub fn scope(&self) -> SequenceScope {
        SequenceScope::new(self.prefix.clone(), self.fiscal_year.clone())
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}
