//! Per-period CSV persistence for reading ledgers.
//!
//! Each period maps to exactly one backing file under the storage root.
//! A single logical writer per period is assumed by convention; concurrent
//! writers to the same period are not supported, and a second writer that
//! loads before the first one saves will overwrite its append.

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use csv::WriterBuilder;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::{Ledger, PeriodKey, Reading};

const COLUMNS: [&str; 6] = ["date", "time", "meter_reading", "difference", "razi", "zaki"];

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::Io(io),
            _ => StoreError::Parse(message),
        }
    }
}

/// Store that maps each period to one CSV file under `data_dir`.
pub struct LedgerStore {
    data_dir: PathBuf,
}

impl LedgerStore {
    /// Create a new store rooted at `data_dir`. The directory is created on
    /// the first save, not here.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the backing ledger file for `period`.
    pub fn ledger_path(&self, period: &PeriodKey) -> PathBuf {
        self.data_dir.join(format!("{period}.csv"))
    }

    /// Path of the closing report artifact for `period`.
    pub fn report_path(&self, period: &PeriodKey) -> PathBuf {
        self.data_dir.join(format!("{period}-summary.txt"))
    }

    /// Loads the ledger for `period`.
    ///
    /// A missing backing file means no data has been recorded yet and yields
    /// an empty ledger. An existing file with an unexpected schema or an
    /// unparsable field yields [`StoreError::Parse`].
    pub fn load(&self, period: &PeriodKey) -> Result<Ledger, StoreError> {
        let path = self.ledger_path(period);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(period = %period, "No backing file, starting empty ledger");
                return Ok(Ledger::default());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut rdr = csv::Reader::from_reader(file);
        let mut readings = Vec::new();
        for result in rdr.deserialize() {
            let reading: Reading = result?;
            readings.push(reading);
        }
        let ledger = Ledger::from(readings);
        debug!(period = %period, rows = ledger.len(), "Loaded ledger");
        Ok(ledger)
    }

    /// Serializes the full ledger to the period's backing file, replacing
    /// any previous contents.
    ///
    /// The rows are written to a temporary file in the storage root which is
    /// then renamed over the target, so a failure mid-write leaves the
    /// previous version intact and the temporary file is removed.
    pub fn save(&self, ledger: &Ledger, period: &PeriodKey) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let tmp = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut wtr = WriterBuilder::new().has_headers(false).from_writer(&tmp);
            wtr.write_record(COLUMNS)?;
            for reading in ledger.readings() {
                wtr.serialize(reading)?;
            }
            wtr.flush()?;
        }
        tmp.persist(self.ledger_path(period))
            .map_err(|e| StoreError::Io(e.error))?;
        info!(period = %period, rows = ledger.len(), "Saved ledger");
        Ok(())
    }
}
