//! StockReport Report — sheet builders, xlsx writer, inspector, verifier.
//!
//! This crate builds on `stockreport-core` to provide:
//! - An in-memory sheet model (`Sheet`, `Cell`)
//! - One pure builder per report sheet, plus `build_report` to write the workbook
//! - An xlsx writer with bold header rows
//! - A workbook inspector for debugging existing files
//! - A verifier that compares a written report with live provider values

pub mod builder;
pub mod error;
pub mod inspect;
pub mod sheet;
pub mod verify;
pub mod writer;

pub use builder::{build_report, build_sheets, report_file_name, SHEET_ORDER};
pub use error::ReportError;
pub use inspect::{
    inspect_many, inspect_workbook, render_summary, SheetSummary, WorkbookSummary, DEFAULT_FILES,
};
pub use sheet::{Cell, Sheet};
pub use verify::{render_verify, verify, HistoricalCheck, VerifyReport};
pub use writer::write_workbook;
