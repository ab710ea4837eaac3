//! Model sheet: quarterly prices and headline financials in a wide grid.
//!
//! Layout (no header row):
//! - row 0: `Main`, blank, period dates
//! - row 1: blank, blank, quarter labels
//! - row 2: blank, `Stock Price`, closes
//! - row 3: blank, `Volume`, volumes
//! - then one row per metric found in the quarterly income statement
//!
//! Statement values are placed by position, not matched to the price dates.

use chrono::{Datelike, NaiveDate};
use stockreport_core::domain::{Bar, Statement};

use super::{DATE_FORMAT, MODEL};
use crate::sheet::{Cell, Sheet};

/// Statement rows copied into the model, in order.
pub const MODEL_METRICS: [&str; 4] = ["Total Revenue", "Net Income", "Total Assets", "Total Debt"];

const FIRST_VALUE_COL: u16 = 2;

/// Calendar-quarter label, e.g. 2024-04-01 -> `Q224`. The year is not zero padded.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{}{}", date.month0() / 3 + 1, date.year() % 100)
}

pub fn build_model(quarterly: &[Bar], financials: &Statement) -> Sheet {
    let mut sheet = Sheet::new(MODEL);
    if quarterly.is_empty() {
        return sheet;
    }

    sheet.put(0, 0, "Main");
    put_series(&mut sheet, 0, quarterly.iter().map(|b| Cell::from(b.date.format(DATE_FORMAT).to_string())));
    put_series(&mut sheet, 1, quarterly.iter().map(|b| Cell::from(quarter_label(b.date))));

    sheet.put(2, 1, "Stock Price");
    put_series(&mut sheet, 2, quarterly.iter().map(|b| Cell::from(b.close)));
    sheet.put(3, 1, "Volume");
    put_series(&mut sheet, 3, quarterly.iter().map(|b| Cell::from(b.volume)));

    if let Some(table) = financials.table() {
        let mut row = 4;
        for metric in MODEL_METRICS {
            if let Some(item) = table.row(metric) {
                sheet.put(row, 1, metric);
                put_series(&mut sheet, row, item.values.iter().map(|v| Cell::from(*v)));
                row += 1;
            }
        }
    }
    sheet
}

fn put_series(sheet: &mut Sheet, row: u32, cells: impl Iterator<Item = Cell>) {
    for (i, cell) in cells.enumerate() {
        sheet.put(row, FIRST_VALUE_COL + i as u16, cell);
    }
}
