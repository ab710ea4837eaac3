//! Sheet builders — one function per sheet, each pure over a `TickerRecord`.
//!
//! `build_sheets` returns the sheets in workbook order; `build_report`
//! writes them to `{TICKER}_stock_data.xlsx`.

pub mod company_info;
pub mod dividends;
pub mod historical;
pub mod main_sheet;
pub mod model;
pub mod statements;

use std::path::{Path, PathBuf};

use stockreport_core::domain::TickerRecord;

use crate::error::ReportError;
use crate::sheet::Sheet;
use crate::writer::write_workbook;

pub use company_info::build_company_info;
pub use dividends::{build_dividends_splits, corporate_action_rows, ActionRow};
pub use historical::build_historical;
pub use main_sheet::build_main;
pub use model::{build_model, quarter_label};
pub use statements::build_statement;

pub const MAIN: &str = "Main";
pub const HISTORICAL_DATA: &str = "Historical Data";
pub const MODEL: &str = "Model";
pub const COMPANY_INFO: &str = "Company Info";
pub const QUARTERLY_FINANCIALS: &str = "Quarterly Financials";
pub const BALANCE_SHEET: &str = "Balance Sheet";
pub const CASH_FLOW: &str = "Cash Flow";
pub const DIVIDENDS_SPLITS: &str = "Dividends & Splits";

/// Workbook tab order.
pub const SHEET_ORDER: [&str; 8] = [
    MAIN,
    HISTORICAL_DATA,
    MODEL,
    COMPANY_INFO,
    QUARTERLY_FINANCIALS,
    BALANCE_SHEET,
    CASH_FLOW,
    DIVIDENDS_SPLITS,
];

/// Report date format for every date cell.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output file name for a ticker.
pub fn report_file_name(ticker: &str) -> String {
    format!("{ticker}_stock_data.xlsx")
}

/// Build every sheet for a record, in workbook order. Sheets whose source
/// is empty are left out.
pub fn build_sheets(record: &TickerRecord) -> Vec<Sheet> {
    let statements = &record.statements;
    [
        Some(build_main(record)),
        Some(build_historical(&record.historical)),
        Some(build_model(&record.quarterly_series, &statements.quarterly_financials)),
        build_company_info(&record.info),
        build_statement(QUARTERLY_FINANCIALS, &statements.quarterly_financials),
        build_statement(BALANCE_SHEET, &statements.balance_sheet),
        build_statement(CASH_FLOW, &statements.cashflow),
        Some(build_dividends_splits(&record.dividends, &record.splits)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Build and write the report for `ticker` into `output_dir`.
///
/// Returns the path of the written file.
pub fn build_report(
    ticker: &str,
    record: &TickerRecord,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.display().to_string(),
        source,
    })?;

    let path = output_dir.join(report_file_name(ticker));
    let sheets = build_sheets(record);
    tracing::info!(
        ticker,
        sheets = sheets.len(),
        path = %path.display(),
        "writing report"
    );
    write_workbook(&path, &sheets)?;
    Ok(path)
}
