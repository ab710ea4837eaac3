//! TickerRecord — everything fetched for one symbol in one run.

use super::{Bar, InfoMap, Statement};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated scalar event (dividend amount or split ratio).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Dividend and split history, each ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporateActions {
    pub dividends: Vec<DatedValue>,
    pub splits: Vec<DatedValue>,
}

/// The six statements, fetched as one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSet {
    pub financials: Statement,
    pub quarterly_financials: Statement,
    pub balance_sheet: Statement,
    pub quarterly_balance_sheet: Statement,
    pub cashflow: Statement,
    pub quarterly_cashflow: Statement,
}

impl StatementSet {
    /// All six statements marked unavailable for the same reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let stmt = || Statement::Unavailable {
            reason: reason.clone(),
        };
        Self {
            financials: stmt(),
            quarterly_financials: stmt(),
            balance_sheet: stmt(),
            quarterly_balance_sheet: stmt(),
            cashflow: stmt(),
            quarterly_cashflow: stmt(),
        }
    }
}

/// Aggregate data for one ticker. Built once by the retriever and then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    pub symbol: String,
    pub info: InfoMap,
    pub historical: Vec<Bar>,
    pub quarterly_series: Vec<Bar>,
    pub statements: StatementSet,
    pub dividends: Vec<DatedValue>,
    pub splits: Vec<DatedValue>,
}

impl TickerRecord {
    /// Empty record for a symbol; every source is empty.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Close of the most recent daily bar.
    pub fn latest_close(&self) -> Option<f64> {
        self.historical.last().map(|b| b.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_set_marks_all_six() {
        let set = StatementSet::unavailable("timeout");
        for stmt in [
            &set.financials,
            &set.quarterly_financials,
            &set.balance_sheet,
            &set.quarterly_balance_sheet,
            &set.cashflow,
            &set.quarterly_cashflow,
        ] {
            assert_eq!(
                stmt,
                &Statement::Unavailable {
                    reason: "timeout".into()
                }
            );
        }
    }

    #[test]
    fn latest_close_of_empty_record() {
        assert_eq!(TickerRecord::empty("AAPL").latest_close(), None);
    }
}
