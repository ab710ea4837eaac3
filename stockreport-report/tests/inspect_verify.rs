//! Inspector and verifier against freshly written reports.

use std::path::{Path, PathBuf};

use stockreport_core::data::{sample_record, FixtureProvider};
use stockreport_core::domain::TickerRecord;
use stockreport_report::builder::{DIVIDENDS_SPLITS, HISTORICAL_DATA, MAIN};
use stockreport_report::{
    build_report, inspect_many, inspect_workbook, render_summary, render_verify, verify,
    ReportError,
};

fn write_sample(dir: &Path, ticker: &str) -> PathBuf {
    build_report(ticker, &sample_record(ticker), dir).unwrap()
}

#[test]
fn inspect_reports_shapes_and_head() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "AAPL");
    let summary = inspect_workbook(&path).unwrap();

    let historical = summary.sheet(HISTORICAL_DATA).unwrap();
    assert_eq!(historical.shape, (260, 13));
    assert_eq!(historical.columns[0], "Date");
    assert_eq!(historical.columns[12], "Volatility");
    assert_eq!(historical.head.len(), 5);
    assert_eq!(historical.head[0][0], "2023-06-01");

    // Main is read from its first used cell: row 0 becomes the header.
    let main = summary.sheet(MAIN).unwrap();
    assert_eq!(main.shape, (8, 3));
    assert_eq!(main.columns[0], "Price");
    assert_eq!(main.columns[2], "Unnamed: 2");

    let actions = summary.sheet(DIVIDENDS_SPLITS).unwrap();
    assert_eq!(actions.columns, vec!["Date", "Type", "Amount"]);
    assert_eq!(actions.head.last().map(|r| r[1].as_str()), Some("Stock Split"));

    let text = render_summary(&summary);
    assert!(text.contains("--- Sheet: Historical Data ---"));
    assert!(text.contains("Shape: (260, 13)"));
}

#[test]
fn empty_sheet_has_zero_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_report("AAPL", &TickerRecord::empty("AAPL"), dir.path()).unwrap();
    let summary = inspect_workbook(&path).unwrap();
    let main = summary.sheet(MAIN).unwrap();
    assert_eq!(main.shape, (0, 0));
    assert!(main.columns.is_empty());
    assert_eq!(summary.sheet(HISTORICAL_DATA).unwrap().shape, (0, 8));
}

#[test]
fn batch_mixes_found_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    let found = write_sample(dir.path(), "MSFT");
    let missing = dir.path().join("TSLA_stock_data.xlsx");

    let mut out = Vec::new();
    inspect_many(&[missing.clone(), found.clone()], &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with(&format!("File {} not found\n", missing.display())));
    assert!(text.contains(&format!("Analyzing {}:", found.display())));
}

#[test]
fn verify_reads_back_report_values() {
    let dir = tempfile::tempdir().unwrap();
    let record = sample_record("AAPL");
    let path = build_report("AAPL", &record, dir.path()).unwrap();
    let provider = FixtureProvider::new(record.clone());

    let report = verify(&provider, "AAPL", &path).unwrap();
    let pairs = report.report_main.as_ref().unwrap();
    assert_eq!(pairs.len(), 9);
    assert_eq!(pairs[0].0, "Price");
    assert_eq!(pairs[8].0, "P/E Ratio");
    assert_eq!(pairs[8].1, "29.6");

    let check = report.historical.as_ref().unwrap();
    assert_eq!(check.points, 260);
    assert_eq!(check.first_date.as_deref(), Some("2023-06-01"));
    assert_eq!(check.latest_close, record.latest_close());
    assert_eq!(*report.live_close.as_ref().unwrap(), record.latest_close());

    let text = render_verify(&report);
    let close = format!("${:.2}", record.latest_close().unwrap());
    assert!(text.contains(&format!("Latest close price: {close}")));
    assert!(text.contains(&format!("Live latest close: {close}")));
    assert!(text.contains("Market Cap: $2,950,000,000,000"));
    assert!(text.contains("Shares Outstanding: 15,500,000,000"));
}

#[test]
fn verify_report_without_main_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.xlsx");
    stockreport_report::write_workbook(&path, &[stockreport_report::Sheet::new("Sheet1")]).unwrap();
    let provider = FixtureProvider::new(sample_record("AAPL"));

    let report = verify(&provider, "AAPL", &path).unwrap();
    assert!(matches!(report.report_main, Err(ReportError::MissingSheet(ref s)) if s == MAIN));
    assert!(matches!(report.historical, Err(ReportError::MissingSheet(_))));
    assert!(report.live_info.is_ok());
}
