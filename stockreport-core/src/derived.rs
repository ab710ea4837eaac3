//! Derived columns appended to the daily history.

use crate::domain::Bar;
use crate::indicators::{DailyReturn, Indicator, RollingVolatility, Sma};

/// Moving-average windows, in bars.
pub const MA_WINDOWS: [usize; 3] = [20, 50, 200];

/// Window for the rolling volatility of daily returns.
pub const VOLATILITY_WINDOW: usize = 20;

/// Per-bar derived values. `None` means not enough history yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedSeries {
    pub daily_return: Vec<Option<f64>>,
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub sma_200: Vec<Option<f64>>,
    pub volatility: Vec<Option<f64>>,
}

impl DerivedSeries {
    /// Compute every derived column for a bar series. All columns have `bars.len()` entries.
    pub fn compute(bars: &[Bar]) -> Self {
        let [w20, w50, w200] = MA_WINDOWS;
        Self {
            daily_return: to_options(DailyReturn::new().compute(bars)),
            sma_20: to_options(Sma::new(w20).compute(bars)),
            sma_50: to_options(Sma::new(w50).compute(bars)),
            sma_200: to_options(Sma::new(w200).compute(bars)),
            volatility: to_options(RollingVolatility::new(VOLATILITY_WINDOW).compute(bars)),
        }
    }

    pub fn len(&self) -> usize {
        self.daily_return.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_return.is_empty()
    }
}

fn to_options(values: Vec<f64>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| if v.is_finite() { Some(v) } else { None })
        .collect()
}
