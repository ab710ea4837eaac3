//! In-memory provider backed by a fixed `TickerRecord`.
//!
//! Used by tests and benchmarks to drive the retriever, report builder and
//! verifier without network access.

use super::provider::{DataError, HistoryRequest, HistorySpan, Interval, MarketDataProvider};
use crate::domain::{
    Bar, CorporateActions, DatedValue, InfoMap, InfoValue, Periodicity, Statement, StatementKind,
    StatementSet, StatementTable, TickerRecord,
};
use chrono::{Datelike, Duration, NaiveDate};
use std::sync::Mutex;

/// Provider that serves one fixed record.
pub struct FixtureProvider {
    record: TickerRecord,
    statement_failure: Option<String>,
    requests: Mutex<Vec<HistoryRequest>>,
}

impl FixtureProvider {
    pub fn new(record: TickerRecord) -> Self {
        Self {
            record,
            statement_failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every statement fetch fail with `reason`.
    pub fn with_statement_failure(mut self, reason: impl Into<String>) -> Self {
        self.statement_failure = Some(reason.into());
        self
    }

    /// History requests received so far, in order.
    pub fn history_requests(&self) -> Vec<HistoryRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), DataError> {
        if symbol == self.record.symbol {
            Ok(())
        } else {
            Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
        }
    }

    fn statement_for(&self, kind: StatementKind, periodicity: Periodicity) -> &Statement {
        let set: &StatementSet = &self.record.statements;
        match (kind, periodicity) {
            (StatementKind::Income, Periodicity::Annual) => &set.financials,
            (StatementKind::Income, Periodicity::Quarterly) => &set.quarterly_financials,
            (StatementKind::BalanceSheet, Periodicity::Annual) => &set.balance_sheet,
            (StatementKind::BalanceSheet, Periodicity::Quarterly) => &set.quarterly_balance_sheet,
            (StatementKind::CashFlow, Periodicity::Annual) => &set.cashflow,
            (StatementKind::CashFlow, Periodicity::Quarterly) => &set.quarterly_cashflow,
        }
    }
}

impl MarketDataProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    fn info(&self, symbol: &str) -> Result<InfoMap, DataError> {
        self.check_symbol(symbol)?;
        Ok(self.record.info.clone())
    }

    /// Daily requests serve `historical` (a `Nd` range serves its last N
    /// bars); any other interval serves `quarterly_series`.
    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<Vec<Bar>, DataError> {
        self.check_symbol(symbol)?;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if request.interval != Interval::Daily {
            return Ok(self.record.quarterly_series.clone());
        }
        let bars = &self.record.historical;
        let trailing = match &request.span {
            HistorySpan::Range(range) => range
                .strip_suffix('d')
                .and_then(|n| n.parse::<usize>().ok()),
            HistorySpan::Between { .. } => None,
        };
        Ok(match trailing {
            Some(n) => bars[bars.len().saturating_sub(n)..].to_vec(),
            None => bars.clone(),
        })
    }

    fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        periodicity: Periodicity,
    ) -> Result<StatementTable, DataError> {
        self.check_symbol(symbol)?;
        if let Some(reason) = &self.statement_failure {
            return Err(DataError::Other(reason.clone()));
        }
        match self.statement_for(kind, periodicity) {
            Statement::Available(table) => Ok(table.clone()),
            Statement::Unavailable { reason } => Err(DataError::Other(reason.clone())),
        }
    }

    fn corporate_actions(&self, symbol: &str) -> Result<CorporateActions, DataError> {
        self.check_symbol(symbol)?;
        Ok(CorporateActions {
            dividends: self.record.dividends.clone(),
            splits: self.record.splits.clone(),
        })
    }
}

/// Deterministic daily bars: a gentle sine wave around 100, one bar per day.
pub fn synthetic_bars(start: NaiveDate, n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar::new(
                start + Duration::days(i as i64),
                close - 0.3,
                close + 1.5,
                close - 1.5,
                close,
                1_000_000 + (i as u64 % 500_000),
            )
        })
        .collect()
}

/// A complete record: 260 daily bars, 20 quarters, statements, dividends and a split.
pub fn sample_record(symbol: &str) -> TickerRecord {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default();

    let entries: [(&str, InfoValue); 10] = [
        ("currentPrice", 190.5.into()),
        ("marketCap", 2.95e12.into()),
        ("sharesOutstanding", 1.55e10.into()),
        ("totalCash", 6.7e10.into()),
        ("totalDebt", 1.08e11.into()),
        ("totalRevenue", 3.85e11.into()),
        ("netIncomeToCommon", 1.0e11.into()),
        ("trailingEps", 6.43.into()),
        ("trailingPE", 29.6.into()),
        ("sector", "Technology".into()),
    ];
    let info: InfoMap = entries.into_iter().collect();

    let quarterly_series: Vec<Bar> = (0..20)
        .map(|i| {
            let year = 2019 + (i / 4) as i32;
            let month = 1 + 3 * (i % 4) as u32;
            let close = 80.0 + i as f64 * 5.0;
            Bar::new(d(year, month, 1), close - 2.0, close + 4.0, close - 4.0, close, 5_000_000 + i as u64)
        })
        .collect();

    let quarter_ends = vec![d(2024, 3, 31), d(2023, 12, 31), d(2023, 9, 30), d(2023, 6, 30)];
    let mut quarterly_financials = StatementTable::new(quarter_ends);
    quarterly_financials.push_item(
        "Total Revenue",
        vec![Some(9.08e10), Some(1.196e11), Some(8.95e10), Some(8.18e10)],
    );
    quarterly_financials.push_item("Net Income", vec![Some(2.36e10), Some(3.39e10), None, Some(1.99e10)]);

    let year_ends = vec![d(2023, 9, 30), d(2022, 9, 30)];
    let mut balance_sheet = StatementTable::new(year_ends.clone());
    balance_sheet.push_item("Total Assets", vec![Some(3.53e11), Some(3.53e11)]);
    balance_sheet.push_item("Total Debt", vec![Some(1.11e11), Some(1.2e11)]);

    let mut cashflow = StatementTable::new(year_ends.clone());
    cashflow.push_item("Operating Cash Flow", vec![Some(1.1e11), Some(1.22e11)]);
    cashflow.push_item("Free Cash Flow", vec![Some(9.96e10), None]);

    let mut financials = StatementTable::new(year_ends);
    financials.push_item("Total Revenue", vec![Some(3.83e11), Some(3.94e11)]);

    let historical = synthetic_bars(d(2023, 6, 1), 260);
    let dividends: Vec<DatedValue> = historical
        .iter()
        .filter(|b| b.date.day() == 10 && b.date.month() % 3 == 2)
        .map(|b| DatedValue::new(b.date, 0.24))
        .collect();

    TickerRecord {
        symbol: symbol.to_string(),
        info,
        historical,
        quarterly_series,
        statements: StatementSet {
            financials: Statement::Available(financials),
            quarterly_financials: Statement::Available(quarterly_financials),
            balance_sheet: Statement::Available(balance_sheet),
            quarterly_balance_sheet: Statement::empty(),
            cashflow: Statement::Available(cashflow),
            quarterly_cashflow: Statement::empty(),
        },
        dividends,
        splits: vec![DatedValue::new(d(2020, 8, 31), 4.0)],
    }
}
