//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the remote source so the
//! retriever and the report builder can be driven by fixtures in tests.

use crate::domain::{Bar, CorporateActions, InfoMap, Periodicity, StatementKind, StatementTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for data operations.
///
/// These are designed to be displayable directly in CLI output.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Bar interval understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Monthly => "1mo",
            Interval::Quarterly => "3mo",
        }
    }
}

/// Time span of a history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySpan {
    /// Explicit window; `end` is exclusive.
    Between {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Provider-relative range such as `5d`, `5y` or `max`.
    Range(String),
}

/// A history query: what span, at what granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub span: HistorySpan,
    pub interval: Interval,
}

impl HistoryRequest {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>, interval: Interval) -> Self {
        Self {
            span: HistorySpan::Between { start, end },
            interval,
        }
    }

    pub fn range(range: impl Into<String>, interval: Interval) -> Self {
        Self {
            span: HistorySpan::Range(range.into()),
            interval,
        }
    }
}

/// Trait for market data providers.
///
/// All calls block. Implementations return empty collections, not errors,
/// when a valid symbol simply has no data of a kind.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Company metadata (price, market cap, sector, ...).
    fn info(&self, symbol: &str) -> Result<InfoMap, DataError>;

    /// OHLCV bars with dividends and splits attached to their dates.
    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<Vec<Bar>, DataError>;

    /// One financial statement at one periodicity.
    fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        periodicity: Periodicity,
    ) -> Result<StatementTable, DataError>;

    /// Full dividend and split history.
    fn corporate_actions(&self, symbol: &str) -> Result<CorporateActions, DataError>;
}
