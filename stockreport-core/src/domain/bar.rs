//! Bar — one OHLCV observation from the provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single interval (a day, or a quarter for the 3-month series).
///
/// `dividends` and `stock_splits` carry the corporate action that fell on the
/// bar's date, or `0.0` when there was none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl Bar {
    /// Bar with no corporate actions attached.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    /// Returns true if any OHLC field is NaN (provider sent a null).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check. Diagnostic only; nothing rejects insane bars.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
