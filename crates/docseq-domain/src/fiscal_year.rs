//! April-to-March fiscal-year calendar.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month (1-12) on which a fiscal year starts.
pub const FISCAL_YEAR_START_MONTH: u32 = 4;

/// Accounting period running from April 1 through March 31 of the next year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FiscalYearWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: String,
}

impl FiscalYearWindow {
    /// Returns the window that contains `date`.
    ///
    /// Only fails at the edges of chrono's representable range.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let start_year = start_year(date);
        let start_date = NaiveDate::from_ymd_opt(start_year, FISCAL_YEAR_START_MONTH, 1)?;
        let end_date = NaiveDate::from_ymd_opt(start_year + 1, FISCAL_YEAR_START_MONTH - 1, 31)?;
        Some(Self {
            start_date,
            end_date,
            label: label_for(start_year),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl fmt::Display for FiscalYearWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {})",
            self.label, self.start_date, self.end_date
        )
    }
}

/// Maps a calendar date to its fiscal-year label, e.g. `2024-2025`.
///
/// January through March belong to the year that started the previous April.
pub fn fiscal_year_label(date: NaiveDate) -> String {
    label_for(start_year(date))
}

fn start_year(date: NaiveDate) -> i32 {
    if date.month() >= FISCAL_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

fn label_for(start_year: i32) -> String {
    format!("{}-{}", start_year, start_year + 1)
}
