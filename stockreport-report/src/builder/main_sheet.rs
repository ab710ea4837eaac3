//! Main summary sheet.
//!
//! Nine fixed rows at columns 12..=14 (label, value, annotation). No header.

use stockreport_core::domain::{InfoMap, InfoValue, TickerRecord};

use super::MAIN;
use crate::sheet::{Cell, Sheet};

pub const LABEL_COL: u16 = 12;
pub const VALUE_COL: u16 = 13;
pub const NOTE_COL: u16 = 14;

/// Placeholder for a metric the provider did not report.
pub const MISSING: &str = "N/A";

/// (label, info key, annotation) for rows 1..=8. Row 0 is the last close.
const INFO_ROWS: [(&str, &str, &str); 8] = [
    ("Shares", "sharesOutstanding", "Latest"),
    ("Market Cap", "marketCap", ""),
    ("Cash", "totalCash", "Latest"),
    ("Debt", "totalDebt", "Latest"),
    ("Revenue", "totalRevenue", "TTM"),
    ("Net Income", "netIncomeToCommon", "TTM"),
    ("EPS", "trailingEps", "TTM"),
    ("P/E Ratio", "trailingPE", ""),
];

pub fn build_main(record: &TickerRecord) -> Sheet {
    let mut sheet = Sheet::new(MAIN);
    let Some(price) = record.latest_close() else {
        return sheet;
    };

    put_row(&mut sheet, 0, "Price", Cell::from(price), "");
    for (i, (label, key, note)) in INFO_ROWS.iter().enumerate() {
        put_row(&mut sheet, i as u32 + 1, label, info_cell(&record.info, key), note);
    }
    sheet
}

fn put_row(sheet: &mut Sheet, row: u32, label: &str, value: Cell, note: &str) {
    sheet.put(row, LABEL_COL, label);
    sheet.put(row, VALUE_COL, value);
    if !note.is_empty() {
        sheet.put(row, NOTE_COL, note);
    }
}

fn info_cell(info: &InfoMap, key: &str) -> Cell {
    match info.get(key) {
        Some(value) => info_value_cell(value),
        None => Cell::from(MISSING),
    }
}

pub(crate) fn info_value_cell(value: &InfoValue) -> Cell {
    match value {
        InfoValue::Number(n) => Cell::from(*n),
        InfoValue::Text(s) => Cell::from(s.as_str()),
        InfoValue::Bool(b) => Cell::Bool(*b),
    }
}
