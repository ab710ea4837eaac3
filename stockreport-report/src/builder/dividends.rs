//! Dividends & Splits sheet: both event lists merged, newest first.

use chrono::NaiveDate;
use stockreport_core::domain::DatedValue;

use super::{DATE_FORMAT, DIVIDENDS_SPLITS};
use crate::sheet::{Cell, Sheet};

pub const DIVIDEND: &str = "Dividend";
pub const STOCK_SPLIT: &str = "Stock Split";

/// One corporate action row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRow {
    pub date: NaiveDate,
    pub kind: &'static str,
    pub amount: f64,
}

/// Dividends then splits, stable-sorted by date descending. Same-day events
/// keep dividends ahead of splits.
pub fn corporate_action_rows(dividends: &[DatedValue], splits: &[DatedValue]) -> Vec<ActionRow> {
    let mut rows: Vec<ActionRow> = dividends
        .iter()
        .map(tagged(DIVIDEND))
        .chain(splits.iter().map(tagged(STOCK_SPLIT)))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

fn tagged(kind: &'static str) -> impl Fn(&DatedValue) -> ActionRow {
    move |v| ActionRow {
        date: v.date,
        kind,
        amount: v.value,
    }
}

/// Always returns a sheet; with no events it holds only the header.
pub fn build_dividends_splits(dividends: &[DatedValue], splits: &[DatedValue]) -> Sheet {
    let mut sheet = Sheet::with_header(DIVIDENDS_SPLITS, ["Date", "Type", "Amount"]);
    for row in corporate_action_rows(dividends, splits) {
        sheet.push_row([
            Cell::from(row.date.format(DATE_FORMAT).to_string()),
            Cell::from(row.kind),
            Cell::from(row.amount),
        ]);
    }
    sheet
}
