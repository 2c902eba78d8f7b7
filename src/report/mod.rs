//! Fixed-layout closing report for a period's ledger.

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::core::{Ledger, PeriodKey, Reading};

/// Reference page width the title is centered on, in character cells.
const PAGE_WIDTH: usize = 200;

const COLUMNS: [(&str, usize); 6] = [
    ("Date", 30),
    ("Time", 25),
    ("Meter Reading", 30),
    ("Difference", 25),
    ("Razi", 25),
    ("Zaki", 25),
];

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::Io(e)
    }
}

/// Renders the report document for `ledger`.
///
/// Deterministic given identical ledger contents: a centered title line, a
/// bordered table of all readings in insertion order, then the monthly
/// summary totals. An empty ledger still renders the title, the header row,
/// and totals of 0.00.
pub fn render(ledger: &Ledger, period: &PeriodKey) -> String {
    let mut out = String::new();

    let title = format!("Electricity Usage Report - {period}");
    writeln!(out, "{:^PAGE_WIDTH$}", title).unwrap();
    out.push('\n');

    push_rule(&mut out);
    push_row(&mut out, COLUMNS.iter().map(|(header, _)| header.to_string()));
    push_rule(&mut out);
    for reading in ledger.readings() {
        push_row(&mut out, row_values(reading));
        push_rule(&mut out);
    }

    out.push('\n');
    writeln!(out, "Monthly Summary").unwrap();
    writeln!(
        out,
        "Total Units Used (Difference): {:.2}",
        ledger.total_difference()
    )
    .unwrap();
    writeln!(out, "Total Razi Units: {:.2}", ledger.total_razi()).unwrap();
    writeln!(out, "Total Zaki Units: {:.2}", ledger.total_zaki()).unwrap();

    out
}

/// Renders the report and writes it to `path`.
pub fn generate(ledger: &Ledger, period: &PeriodKey, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, render(ledger, period))?;
    info!(period = %period, path = %path.display(), "Report generated");
    Ok(())
}

fn row_values(reading: &Reading) -> impl Iterator<Item = String> {
    [
        reading.date.format("%Y-%m-%d").to_string(),
        reading.time.format("%H:%M:%S").to_string(),
        reading.meter_reading.to_string(),
        reading.difference.to_string(),
        reading.razi.to_string(),
        reading.zaki.to_string(),
    ]
    .into_iter()
}

fn push_row(out: &mut String, values: impl Iterator<Item = String>) {
    out.push('|');
    for (&(_, width), value) in COLUMNS.iter().zip(values) {
        write!(out, "{:<width$}|", value).unwrap();
    }
    out.push('\n');
}

fn push_rule(out: &mut String) {
    out.push('+');
    for (_, width) in COLUMNS {
        for _ in 0..width {
            out.push('-');
        }
        out.push('+');
    }
    out.push('\n');
}
