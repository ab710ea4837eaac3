//! Historical Data sheet: daily bars plus derived columns.

use stockreport_core::derived::DerivedSeries;
use stockreport_core::domain::Bar;

use super::{DATE_FORMAT, HISTORICAL_DATA};
use crate::sheet::{Cell, Sheet};

/// Columns present for every bar.
pub const BASE_COLUMNS: [&str; 8] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Dividends",
    "Stock Splits",
];

/// Columns appended when there is at least one bar.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "Daily Return",
    "20-Day MA",
    "50-Day MA",
    "200-Day MA",
    "Volatility",
];

pub fn build_historical(bars: &[Bar]) -> Sheet {
    if bars.is_empty() {
        return Sheet::with_header(HISTORICAL_DATA, BASE_COLUMNS);
    }

    let header = BASE_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()).copied();
    let mut sheet = Sheet::with_header(HISTORICAL_DATA, header);
    let derived = DerivedSeries::compute(bars);

    for (i, bar) in bars.iter().enumerate() {
        sheet.push_row([
            Cell::from(bar.date.format(DATE_FORMAT).to_string()),
            Cell::from(bar.open),
            Cell::from(bar.high),
            Cell::from(bar.low),
            Cell::from(bar.close),
            Cell::from(bar.volume),
            Cell::from(bar.dividends),
            Cell::from(bar.stock_splits),
            Cell::from(derived.daily_return[i]),
            Cell::from(derived.sma_20[i]),
            Cell::from(derived.sma_50[i]),
            Cell::from(derived.sma_200[i]),
            Cell::from(derived.volatility[i]),
        ]);
    }
    sheet
}
