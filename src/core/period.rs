use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};

/// Error returned when a period key string is not of the form `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodKeyError(String);

impl fmt::Display for PeriodKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period key: {}", self.0)
    }
}

impl std::error::Error for PeriodKeyError {}

/// Identifier of one calendar month's accounting period, e.g. `2025-06`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Returns the key of the period the local clock currently falls in.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodKeyError(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
