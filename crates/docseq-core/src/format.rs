//! Rendering and parsing of formatted document numbers.

use docseq_domain::{DocumentNumber, SequenceScope, DEFAULT_SEQUENCE_WIDTH};

/// Zero-pads sequences to a fixed width behind a prefix (`EXP-006`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatter {
    width: usize,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            width: DEFAULT_SEQUENCE_WIDTH,
        }
    }
}

impl NumberFormatter {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Sequences wider than the pad width render with all of their digits.
    pub fn format(&self, prefix: &str, sequence: u32) -> String {
        format!("{prefix}{sequence:0width$}", width = self.width)
    }

    /// Returns `true` when `sequence` renders without exceeding the pad width.
    pub fn fits(&self, sequence: u32) -> bool {
        digit_count(sequence) <= self.width
    }

    pub fn number(&self, scope: &SequenceScope, sequence: u32) -> DocumentNumber {
        DocumentNumber {
            prefix: scope.prefix.clone(),
            fiscal_year: scope.fiscal_year.clone(),
            sequence,
            formatted: self.format(&scope.prefix, sequence),
        }
    }
}

/// Formats with the default three-digit width.
pub fn format_number(prefix: &str, sequence: u32) -> String {
    NumberFormatter::default().format(prefix, sequence)
}

/// Strips `prefix` and parses the remaining digits.
///
/// Returns `None` when the prefix does not match or the remainder is empty or
/// contains anything other than ASCII digits.
pub fn parse_sequence(prefix: &str, formatted: &str) -> Option<u32> {
    let digits = formatted.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn digit_count(mut value: u32) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
