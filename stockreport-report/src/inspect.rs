//! Workbook inspector — prints the structure of existing xlsx files.
//!
//! Each sheet is read as a table whose first used row is the header, the
//! way a dataframe reader would see it.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::ReportError;

/// Data rows shown per sheet.
pub const HEAD_ROWS: usize = 5;

/// Files inspected when none are given on the command line.
pub const DEFAULT_FILES: [&str; 4] = [
    "AAPL.xlsx",
    "AAPL_stock_data.xlsx",
    "MSFT_stock_data.xlsx",
    "TSLA_stock_data.xlsx",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub name: String,
    /// (data rows, columns); the header row is not counted.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub head: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSummary {
    pub path: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

impl WorkbookSummary {
    pub fn sheet(&self, name: &str) -> Option<&SheetSummary> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

pub(crate) fn open(path: &Path) -> Result<Xlsx<BufReader<File>>, ReportError> {
    Ok(open_workbook(path)?)
}

/// Read one sheet, mapping an unknown name to `MissingSheet`.
pub(crate) fn read_sheet(
    workbook: &mut Xlsx<BufReader<File>>,
    name: &str,
) -> Result<Range<Data>, ReportError> {
    if !workbook.sheet_names().iter().any(|n| n == name) {
        return Err(ReportError::MissingSheet(name.to_string()));
    }
    Ok(workbook.worksheet_range(name)?)
}

pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

pub fn inspect_workbook(path: &Path) -> Result<WorkbookSummary, ReportError> {
    let mut workbook = open(path)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = read_sheet(&mut workbook, &name)?;
        sheets.push(summarize(name, &range));
    }
    Ok(WorkbookSummary {
        path: path.to_path_buf(),
        sheets,
    })
}

fn summarize(name: String, range: &Range<Data>) -> SheetSummary {
    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .enumerate()
                .map(|(i, cell)| match cell_text(cell) {
                    text if text.is_empty() => format!("Unnamed: {i}"),
                    text => text,
                })
                .collect()
        })
        .unwrap_or_default();
    let head = rows
        .take(HEAD_ROWS)
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let (height, width) = range.get_size();
    SheetSummary {
        name,
        shape: (height.saturating_sub(1), if height == 0 { 0 } else { width }),
        columns,
        head,
    }
}

/// Human-readable rendering of a workbook summary.
pub fn render_summary(summary: &WorkbookSummary) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format!("\nAnalyzing {}:\n", file_label(&summary.path)));
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!("Sheet names: {:?}\n", summary.sheet_names()));

    for sheet in &summary.sheets {
        out.push_str(&format!("\n--- Sheet: {} ---\n", sheet.name));
        out.push_str(&format!("Shape: ({}, {})\n", sheet.shape.0, sheet.shape.1));
        out.push_str(&format!("Columns: {:?}\n", sheet.columns));
        out.push_str("First few rows:\n");
        if sheet.head.is_empty() {
            out.push_str("(no data rows)\n");
        }
        for (i, row) in sheet.head.iter().enumerate() {
            out.push_str(&format!("{i}\t{}\n", row.join("\t")));
        }
    }
    out
}

/// Inspect each path in turn. A missing or unreadable file is reported and
/// skipped; only a failed write to `out` stops the batch.
pub fn inspect_many<W: Write>(paths: &[PathBuf], out: &mut W) -> std::io::Result<()> {
    for path in paths {
        let label = file_label(path);
        if !path.exists() {
            writeln!(out, "File {label} not found")?;
            continue;
        }
        match inspect_workbook(path) {
            Ok(summary) => write!(out, "{}", render_summary(&summary))?,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "inspect failed");
                writeln!(out, "Error reading {label}: {e}")?;
            }
        }
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.display().to_string()
}
