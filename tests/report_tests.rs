use meter_ledger::core::{Ledger, PeriodKey, Reading};
use meter_ledger::report;
use tempfile::TempDir;

fn key() -> PeriodKey {
    "2025-06".parse().unwrap()
}

fn reading(date: &str, time: &str, meter: f64, razi: f64, zaki: f64) -> Reading {
    Reading::new(
        date.parse().unwrap(),
        time.parse().unwrap(),
        meter,
        razi,
        zaki,
    )
    .unwrap()
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    ledger.record(reading("2025-06-01", "08:00:00", 100.0, 0.0, 0.0));
    ledger.record(reading("2025-06-02", "08:00:00", 115.5, 6.0, 9.5));
    ledger.record(reading("2025-06-03", "09:30:00", 125.5, 5.0, 5.0));
    ledger
}

fn header_row() -> String {
    format!(
        "|{:<30}|{:<25}|{:<30}|{:<25}|{:<25}|{:<25}|",
        "Date", "Time", "Meter Reading", "Difference", "Razi", "Zaki"
    )
}

#[test]
fn title_is_centered_on_the_page_width() {
    let out = report::render(&Ledger::default(), &key());
    let title_line = out.lines().next().unwrap();
    assert_eq!(title_line.len(), 200);
    assert_eq!(title_line.trim(), "Electricity Usage Report - 2025-06");

    let leading = title_line.len() - title_line.trim_start().len();
    let trailing = title_line.len() - title_line.trim_end().len();
    assert!(leading.abs_diff(trailing) <= 1);
}

#[test]
fn empty_ledger_renders_headers_and_zero_totals() {
    let out = report::render(&Ledger::default(), &key());

    assert!(out.contains(&header_row()));
    let data_rows = out.lines().filter(|l| l.starts_with('|')).count();
    assert_eq!(data_rows, 1, "only the header row should be rendered");

    assert!(out.contains("Monthly Summary"));
    assert!(out.contains("Total Units Used (Difference): 0.00"));
    assert!(out.contains("Total Razi Units: 0.00"));
    assert!(out.contains("Total Zaki Units: 0.00"));
}

#[test]
fn totals_sum_the_ledger_columns() {
    let out = report::render(&sample_ledger(), &key());
    assert!(out.contains("Total Units Used (Difference): 25.50"));
    assert!(out.contains("Total Razi Units: 11.00"));
    assert!(out.contains("Total Zaki Units: 14.50"));
}

#[test]
fn rows_render_canonical_value_forms() {
    let out = report::render(&sample_ledger(), &key());
    let expected = format!(
        "|{:<30}|{:<25}|{:<30}|{:<25}|{:<25}|{:<25}|",
        "2025-06-02", "08:00:00", "115.5", "15.5", "6", "9.5"
    );
    assert!(out.contains(&expected), "missing row in:\n{out}");

    let data_rows = out.lines().filter(|l| l.starts_with('|')).count();
    assert_eq!(data_rows, 4, "header plus one row per reading");
}

#[test]
fn rendering_is_deterministic() {
    let ledger = sample_ledger();
    assert_eq!(
        report::render(&ledger, &key()),
        report::render(&ledger, &key())
    );
}

#[test]
fn generate_writes_the_rendered_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("2025-06-summary.txt");
    let ledger = sample_ledger();

    report::generate(&ledger, &key(), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, report::render(&ledger, &key()));
}

#[test]
fn closing_again_regenerates_from_current_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("2025-06-summary.txt");

    let mut ledger = Ledger::default();
    ledger.record(reading("2025-06-01", "08:00:00", 100.0, 0.0, 0.0));
    report::generate(&ledger, &key(), &path).unwrap();

    ledger.record(reading("2025-06-02", "08:00:00", 115.5, 6.0, 9.5));
    report::generate(&ledger, &key(), &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Total Units Used (Difference): 15.50"));
}
