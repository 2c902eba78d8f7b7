//! Core logic for the append-only monthly reading ledger.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod period;

pub use period::{PeriodKey, PeriodKeyError};

/// Errors that can occur when creating a [`Reading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    /// The cumulative meter value is negative.
    NegativeMeterReading,
    /// A per-party usage share is negative.
    NegativeShare,
}

impl std::fmt::Display for ReadingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingError::NegativeMeterReading => {
                write!(f, "meter reading must not be negative")
            }
            ReadingError::NegativeShare => write!(f, "usage shares must not be negative"),
        }
    }
}

impl std::error::Error for ReadingError {}

/// One recorded meter observation.
///
/// `difference` is derived when the reading is committed to a [`Ledger`]: the
/// delta versus the previous entry, stored as-is. A meter value lower than
/// the previous one yields a negative delta; rollover handling is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Calendar date of the reading.
    pub date: NaiveDate,
    /// Time of day of the reading.
    pub time: NaiveTime,
    /// Cumulative meter value at the time of recording.
    pub meter_reading: f64,
    /// Delta versus the previous entry in the same ledger.
    pub difference: f64,
    /// Usage share attributed to Razi for this interval.
    pub razi: f64,
    /// Usage share attributed to Zaki for this interval.
    pub zaki: f64,
}

impl Reading {
    /// Creates a new reading after validating that the meter value and both
    /// usage shares are non-negative. The difference starts at zero and is
    /// computed by [`Ledger::record`].
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        meter_reading: f64,
        razi: f64,
        zaki: f64,
    ) -> Result<Self, ReadingError> {
        if meter_reading < 0.0 {
            return Err(ReadingError::NegativeMeterReading);
        }
        if razi < 0.0 || zaki < 0.0 {
            return Err(ReadingError::NegativeShare);
        }

        Ok(Self {
            date,
            time,
            meter_reading,
            difference: 0.0,
            razi,
            zaki,
        })
    }
}

/// Append-only sequence of readings for one accounting period.
///
/// A ledger belongs to exactly one period; periods never merge or split.
/// Entries keep their insertion order and are never edited or removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ledger {
    readings: Vec<Reading>,
}

impl From<Vec<Reading>> for Ledger {
    /// Rebuilds a ledger from rows whose differences were already derived,
    /// trusting the stored values. Used when loading persisted ledgers.
    fn from(readings: Vec<Reading>) -> Self {
        Self { readings }
    }
}

impl Ledger {
    /// Appends a reading, deriving its difference from the last entry.
    ///
    /// The first entry of a ledger gets a difference of zero; every later
    /// entry gets `meter_reading - previous.meter_reading`, unclamped.
    pub fn record(&mut self, mut reading: Reading) -> &Reading {
        reading.difference = match self.readings.last() {
            Some(previous) => reading.meter_reading - previous.meter_reading,
            None => 0.0,
        };
        self.readings.push(reading);
        self.readings.last().unwrap()
    }

    /// Returns an iterator over all readings in insertion order.
    pub fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Returns the most recently appended reading.
    pub fn last(&self) -> Option<&Reading> {
        self.readings.last()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Sum of the difference column, the units consumed over the period.
    pub fn total_difference(&self) -> f64 {
        self.readings.iter().map(|r| r.difference).sum()
    }

    /// Sum of Razi's usage shares.
    pub fn total_razi(&self) -> f64 {
        self.readings.iter().map(|r| r.razi).sum()
    }

    /// Sum of Zaki's usage shares.
    pub fn total_zaki(&self) -> f64 {
        self.readings.iter().map(|r| r.zaki).sum()
    }
}
