//! Retriever — assembles a `TickerRecord` from a provider.
//!
//! Policy:
//! - info, daily history, quarterly series and corporate actions are required;
//!   any error there fails the whole fetch
//! - the six statements are fetched as a group; if any of them errors, all
//!   six are recorded as `Statement::Unavailable` and the fetch carries on

use super::provider::{DataError, HistoryRequest, Interval, MarketDataProvider};
use crate::config::FetchConfig;
use crate::domain::{Periodicity, Statement, StatementKind, StatementSet, TickerRecord};
use chrono::{DateTime, Duration, Utc};

/// Fetch everything for `ticker`, using the current time as the window end.
pub fn fetch_ticker(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    config: &FetchConfig,
) -> Result<TickerRecord, DataError> {
    fetch_ticker_at(provider, ticker, config, Utc::now())
}

/// Fetch everything for `ticker` with an explicit window end.
pub fn fetch_ticker_at(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    config: &FetchConfig,
    now: DateTime<Utc>,
) -> Result<TickerRecord, DataError> {
    let symbol = ticker.trim();
    if symbol.is_empty() {
        return Err(DataError::InvalidTicker(ticker.to_string()));
    }

    tracing::info!(symbol, provider = provider.name(), "fetching company info");
    let info = provider.info(symbol)?;

    let start = now - Duration::days(config.history_days);
    tracing::info!(symbol, %start, end = %now, "fetching daily history");
    let historical = provider.history(symbol, &HistoryRequest::between(start, now, Interval::Daily))?;
    let suspect = historical.iter().filter(|b| !b.is_sane()).count();
    if suspect > 0 {
        tracing::warn!(symbol, suspect, "daily bars failing OHLC sanity check");
    }

    tracing::info!(symbol, range = %config.quarterly_range, "fetching quarterly series");
    let quarterly_series = provider.history(
        symbol,
        &HistoryRequest::range(config.quarterly_range.clone(), config.quarterly_interval),
    )?;

    let statements = fetch_statements(provider, symbol);

    tracing::info!(symbol, "fetching dividends and splits");
    let actions = provider.corporate_actions(symbol)?;

    tracing::info!(
        symbol,
        bars = historical.len(),
        quarters = quarterly_series.len(),
        dividends = actions.dividends.len(),
        splits = actions.splits.len(),
        "fetch complete"
    );

    Ok(TickerRecord {
        symbol: symbol.to_string(),
        info,
        historical,
        quarterly_series,
        statements,
        dividends: actions.dividends,
        splits: actions.splits,
    })
}

/// Fetch the six statements. Never fails: an error in any fetch marks the
/// whole group unavailable.
pub fn fetch_statements(provider: &dyn MarketDataProvider, symbol: &str) -> StatementSet {
    match try_fetch_statements(provider, symbol) {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!(symbol, error = %e, "financial statements unavailable");
            StatementSet::unavailable(e.to_string())
        }
    }
}

fn try_fetch_statements(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<StatementSet, DataError> {
    let fetch = |kind: StatementKind, periodicity: Periodicity| -> Result<Statement, DataError> {
        tracing::info!(symbol, %kind, ?periodicity, "fetching statement");
        Ok(Statement::Available(provider.statement(symbol, kind, periodicity)?))
    };

    Ok(StatementSet {
        financials: fetch(StatementKind::Income, Periodicity::Annual)?,
        quarterly_financials: fetch(StatementKind::Income, Periodicity::Quarterly)?,
        balance_sheet: fetch(StatementKind::BalanceSheet, Periodicity::Annual)?,
        quarterly_balance_sheet: fetch(StatementKind::BalanceSheet, Periodicity::Quarterly)?,
        cashflow: fetch(StatementKind::CashFlow, Periodicity::Annual)?,
        quarterly_cashflow: fetch(StatementKind::CashFlow, Periodicity::Quarterly)?,
    })
}
