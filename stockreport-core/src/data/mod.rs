//! Market data retrieval

pub mod fetch;
pub mod fixture;
pub mod provider;
pub mod timeseries;
pub mod yahoo;

pub use fetch::{fetch_statements, fetch_ticker, fetch_ticker_at};
pub use fixture::{sample_record, synthetic_bars, FixtureProvider};
pub use provider::{DataError, HistoryRequest, HistorySpan, Interval, MarketDataProvider};
pub use yahoo::YahooProvider;
