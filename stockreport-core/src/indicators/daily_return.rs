//! Daily return — fractional change of close versus the prior close.
//!
//! RET[t] = (close[t] - close[t-1]) / close[t-1]
//! Lookback: 1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct DailyReturn;

impl DailyReturn {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for DailyReturn {
    fn name(&self) -> &str {
        "daily_return"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        pct_change(&closes)
    }
}

/// Percent change between consecutive values, as a fraction. Index 0 is NaN.
pub(crate) fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        let prev = values[i - 1];
        let curr = values[i];
        if !prev.is_nan() && !curr.is_nan() && prev != 0.0 {
            result[i] = (curr - prev) / prev;
        }
    }
    result
}
