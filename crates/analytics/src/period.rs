use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use chipstock_core::{DomainError, DomainResult};

/// Spanish month names, indexed 0–11, as printed on reports.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Month restriction inside a reporting year: a single month (0-based
/// index) or the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl MonthFilter {
    /// Map the UI's selector value: `-1` means "whole year", `0..=11` a
    /// single month. Anything else is rejected.
    pub fn from_index(index: i32) -> DomainResult<Self> {
        match index {
            -1 => Ok(MonthFilter::All),
            0..=11 => Ok(MonthFilter::Month(index as u32)),
            other => Err(DomainError::validation(format!(
                "month selector out of range: {other}"
            ))),
        }
    }
}

/// A reporting period: one year, optionally narrowed to one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: MonthFilter,
}

impl Period {
    pub fn new(year: i32, month: MonthFilter) -> Self {
        Self { year, month }
    }

    /// Whole-year period.
    pub fn year_of(year: i32) -> Self {
        Self {
            year,
            month: MonthFilter::All,
        }
    }

    /// Whether `date` falls inside the period. The year must match; the
    /// month must match unless the filter is `All`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if date.year() != self.year {
            return false;
        }
        match self.month {
            MonthFilter::All => true,
            MonthFilter::Month(index) => date.month0() == index,
        }
    }

    /// Human period label: `"Enero 2025"` or `"Todo el Año 2025"`.
    pub fn label(&self) -> String {
        match self.month {
            MonthFilter::All => format!("Todo el Año {}", self.year),
            MonthFilter::Month(index) => {
                format!("{} {}", MONTH_NAMES[index as usize], self.year)
            }
        }
    }
}
