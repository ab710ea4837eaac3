//! Rolling annualized volatility of daily returns.
//!
//! VOL[t] = stddev(RET[t-period+1..=t]) * sqrt(252)
//!
//! Uses sample stddev (divide by N-1). Since RET[0] is NaN, the first valid
//! value is at index `period`.

use super::daily_return::pct_change;
use super::Indicator;
use crate::domain::Bar;

/// Trading days per year used to annualize.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone)]
pub struct RollingVolatility {
    period: usize,
    name: String,
}

impl RollingVolatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "volatility period must be >= 2");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for RollingVolatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let returns = pct_change(&closes);
        let n = returns.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &returns[(i + 1 - self.period)..=i];
            if window.iter().any(|r| r.is_nan()) {
                continue;
            }
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let variance = window.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
                / (self.period - 1) as f64;
            result[i] = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
        }

        result
    }
}
