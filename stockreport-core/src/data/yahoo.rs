//! Yahoo Finance data provider.
//!
//! Endpoints:
//! - v8 chart API for OHLCV history plus dividend/split events
//! - v10 quoteSummary for company metadata (needs a cookie + crumb session)
//! - fundamentals-timeseries for the financial statements
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Every request is made once; there are no retries.

use super::provider::{DataError, HistoryRequest, HistorySpan, Interval, MarketDataProvider};
use super::timeseries::{parse_timeseries, timeseries_types, TIMESERIES_PERIOD_START};
use crate::config::FetchConfig;
use crate::domain::{
    Bar, CorporateActions, DatedValue, InfoMap, InfoValue, Periodicity, StatementKind,
    StatementTable,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

/// quoteSummary modules flattened into the info map, in priority order.
pub const SUMMARY_MODULES: &[&str] = &[
    "assetProfile",
    "summaryDetail",
    "financialData",
    "defaultKeyStatistics",
    "price",
    "quoteType",
];

/// Wait assumed when a 429 carries no usable `retry-after`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
    events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
    #[serde(rename = "exchangeTimezoneName")]
    exchange_timezone_name: Option<String>,
}

/// Converts provider timestamps to exchange-local calendar dates.
///
/// `gmtoffset` is the offset at request time, so it is only used when the
/// exchange timezone is missing or unknown.
#[derive(Debug, Clone, Copy)]
enum ExchangeClock {
    Zone(Tz),
    Fixed(i64),
}

impl ExchangeClock {
    fn from_meta(meta: Option<&ChartMeta>) -> Self {
        let zone = meta
            .and_then(|m| m.exchange_timezone_name.as_deref())
            .and_then(|name| match name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    tracing::warn!(timezone = name, "unknown exchange timezone, using gmtoffset");
                    None
                }
            });
        match zone {
            Some(tz) => ExchangeClock::Zone(tz),
            None => ExchangeClock::Fixed(meta.and_then(|m| m.gmtoffset).unwrap_or(0)),
        }
    }

    /// Calendar date of `ts` on the exchange.
    fn date(self, ts: i64) -> Result<NaiveDate, DataError> {
        let invalid = || DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"));
        match self {
            ExchangeClock::Zone(tz) => DateTime::<Utc>::from_timestamp(ts, 0)
                .map(|dt| dt.with_timezone(&tz).date_naive())
                .ok_or_else(invalid),
            ExchangeClock::Fixed(offset) => DateTime::<Utc>::from_timestamp(ts + offset, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(invalid),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

/// quoteSummary response envelope. Module bodies are kept as raw JSON.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<Value>>,
    error: Option<ApiError>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    config: FetchConfig,
    crumb: OnceLock<String>,
}

impl YahooProvider {
    pub fn new(config: &FetchConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
            crumb: OnceLock::new(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{symbol}", self.config.chart_base_url)
    }

    /// Query parameters for a chart request.
    fn chart_query(request: &HistoryRequest) -> Vec<(&'static str, String)> {
        let mut query = match &request.span {
            HistorySpan::Between { start, end } => vec![
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
            ],
            HistorySpan::Range(range) => vec![("range", range.clone())],
        };
        query.push(("interval", request.interval.as_str().to_string()));
        query.push(("events", "div,splits".to_string()));
        query.push(("includeAdjustedClose", "true".to_string()));
        query
    }

    /// Send a GET and decode the JSON body, mapping HTTP failures to `DataError`.
    fn get_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataError> {
        tracing::debug!(%url, ?query, "GET");
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(map_transport_error)?;

        if let Some(err) = status_error(
            resp.status(),
            resp.headers().get(reqwest::header::RETRY_AFTER),
            symbol,
        ) {
            return Err(err);
        }

        resp.json::<T>().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })
    }

    /// Cookie + crumb session, established on first use.
    fn crumb(&self) -> Result<String, DataError> {
        if let Some(crumb) = self.crumb.get() {
            return Ok(crumb.clone());
        }

        // Only the Set-Cookie matters; this host usually answers 404.
        if let Err(e) = self.client.get(&self.config.cookie_url).send() {
            tracing::warn!(error = %e, "cookie request failed, trying crumb anyway");
        }

        let resp = self
            .client
            .get(&self.config.crumb_url)
            .send()
            .map_err(map_transport_error)?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after_secs(resp.headers().get(reqwest::header::RETRY_AFTER)),
            });
        }
        let crumb = validate_crumb(&resp.text().map_err(map_transport_error)?)?;

        tracing::debug!("obtained Yahoo Finance crumb");
        Ok(self.crumb.get_or_init(|| crumb).clone())
    }

    fn fetch_chart(&self, symbol: &str, request: &HistoryRequest) -> Result<ChartData, DataError> {
        let url = self.chart_url(symbol);
        let chart: ChartResponse = self.get_json(symbol, &url, &Self::chart_query(request))?;
        first_chart_result(symbol, chart)
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn info(&self, symbol: &str) -> Result<InfoMap, DataError> {
        let crumb = self.crumb()?;
        let url = format!(
            "{}/v10/finance/quoteSummary/{symbol}",
            self.config.summary_base_url
        );
        let query = [
            ("modules", SUMMARY_MODULES.join(",")),
            ("crumb", crumb),
            ("formatted", "false".to_string()),
        ];
        let resp: SummaryResponse = self.get_json(symbol, &url, &query)?;

        let result = match resp.quote_summary.result {
            Some(results) => results.into_iter().next(),
            None => None,
        };
        match (result, resp.quote_summary.error) {
            (Some(result), _) => Ok(flatten_summary(&result)),
            (None, Some(err)) => Err(api_error(symbol, err)),
            (None, None) => Err(DataError::ResponseFormatChanged(
                "quoteSummary returned no result and no error".into(),
            )),
        }
    }

    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<Vec<Bar>, DataError> {
        let data = self.fetch_chart(symbol, request)?;
        parse_chart_bars(data)
    }

    fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        periodicity: Periodicity,
    ) -> Result<StatementTable, DataError> {
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}",
            self.config.chart_base_url
        );
        let query = [
            ("symbol", symbol.to_string()),
            ("type", timeseries_types(kind, periodicity)),
            ("period1", TIMESERIES_PERIOD_START.to_string()),
            ("period2", Utc::now().timestamp().to_string()),
        ];
        let body: Value = self.get_json(symbol, &url, &query)?;
        parse_timeseries(&body, kind, periodicity)
    }

    fn corporate_actions(&self, symbol: &str) -> Result<CorporateActions, DataError> {
        let request = HistoryRequest::range("max", Interval::Monthly);
        let data = self.fetch_chart(symbol, &request)?;
        Ok(parse_chart_actions(&data))
    }
}

fn map_transport_error(e: reqwest::Error) -> DataError {
    if e.is_connect() || e.is_timeout() {
        DataError::NetworkUnreachable(e.to_string())
    } else {
        DataError::Other(e.to_string())
    }
}

/// Error for a non-success HTTP status, or `None` on success.
fn status_error(
    status: StatusCode,
    retry_after: Option<&HeaderValue>,
    symbol: &str,
) -> Option<DataError> {
    match status {
        s if s.is_success() => None,
        StatusCode::NOT_FOUND => Some(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        }),
        StatusCode::UNAUTHORIZED => Some(DataError::AuthenticationRequired(format!(
            "Yahoo Finance rejected the session for {symbol}"
        ))),
        StatusCode::TOO_MANY_REQUESTS => Some(DataError::RateLimited {
            retry_after_secs: retry_after_secs(retry_after),
        }),
        s => Some(DataError::Http {
            status: s.as_u16(),
            symbol: symbol.to_string(),
        }),
    }
}

fn retry_after_secs(header: Option<&HeaderValue>) -> u64 {
    header
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// A crumb is a short opaque token; an HTML page or an error sentence means
/// the consent cookie was not accepted.
fn validate_crumb(body: &str) -> Result<String, DataError> {
    let crumb = body.trim();
    if crumb.is_empty() || crumb.contains('<') || crumb.contains(char::is_whitespace) {
        return Err(DataError::AuthenticationRequired(
            "could not obtain a Yahoo Finance crumb".into(),
        ));
    }
    Ok(crumb.to_string())
}

fn api_error(symbol: &str, err: ApiError) -> DataError {
    if err.code == "Not Found" {
        DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        }
    } else {
        DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
    }
}

fn first_chart_result(symbol: &str, resp: ChartResponse) -> Result<ChartData, DataError> {
    match (resp.chart.result, resp.chart.error) {
        (Some(results), _) => results
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into())),
        (None, Some(err)) => Err(api_error(symbol, err)),
        (None, None) => Err(DataError::ResponseFormatChanged(
            "empty result with no error".into(),
        )),
    }
}

/// Parse chart data into bars.
///
/// OHLC are adjusted by `adjclose / close` when an adjusted close is present,
/// so the close column is dividend- and split-adjusted. Dividend and split
/// events are attached to the last bar on or before their date.
fn parse_chart_bars(data: ChartData) -> Result<Vec<Bar>, DataError> {
    let clock = ExchangeClock::from_meta(data.meta.as_ref());
    let actions = parse_chart_actions(&data);
    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;
    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        // Skip bars where all OHLCV are None (holidays/non-trading days)
        if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none()
        {
            continue;
        }

        let adj_close = adj_closes
            .as_ref()
            .and_then(|v| v.get(i).copied().flatten());
        let ratio = match (adj_close, close) {
            (Some(adj), Some(c)) if c != 0.0 => adj / c,
            _ => 1.0,
        };

        bars.push(Bar::new(
            clock.date(ts)?,
            open.map_or(f64::NAN, |v| v * ratio),
            high.map_or(f64::NAN, |v| v * ratio),
            low.map_or(f64::NAN, |v| v * ratio),
            close.map_or(f64::NAN, |v| v * ratio),
            volume.unwrap_or(0),
        ));
    }

    attach_actions(&mut bars, &actions);
    Ok(bars)
}

fn attach_actions(bars: &mut [Bar], actions: &CorporateActions) {
    let slot = |bars: &[Bar], date: NaiveDate| {
        bars.partition_point(|b| b.date <= date).checked_sub(1)
    };

    for div in &actions.dividends {
        match slot(bars, div.date) {
            Some(i) => bars[i].dividends += div.value,
            None => tracing::warn!(date = %div.date, "dividend precedes history window"),
        }
    }
    for split in &actions.splits {
        match slot(bars, split.date) {
            Some(i) => {
                let bar = &mut bars[i];
                bar.stock_splits = if bar.stock_splits == 0.0 {
                    split.value
                } else {
                    bar.stock_splits * split.value
                };
            }
            None => tracing::warn!(date = %split.date, "split precedes history window"),
        }
    }
}

/// Dividend and split events from chart data, each sorted by date ascending.
fn parse_chart_actions(data: &ChartData) -> CorporateActions {
    let clock = ExchangeClock::from_meta(data.meta.as_ref());
    let Some(events) = &data.events else {
        return CorporateActions::default();
    };

    let mut dividends: Vec<DatedValue> = events
        .dividends
        .values()
        .filter_map(|d| {
            clock.date(d.date)
                .ok()
                .map(|date| DatedValue::new(date, d.amount))
        })
        .collect();
    dividends.sort_by_key(|d| d.date);

    let mut splits: Vec<DatedValue> = events
        .splits
        .values()
        .filter(|s| s.denominator != 0.0)
        .filter_map(|s| {
            clock.date(s.date)
                .ok()
                .map(|date| DatedValue::new(date, s.numerator / s.denominator))
        })
        .collect();
    splits.sort_by_key(|s| s.date);

    CorporateActions { dividends, splits }
}

/// Flatten quoteSummary modules into one info map.
///
/// `{raw: x}` objects become numbers; strings, numbers and bools are kept;
/// arrays, nulls and empty objects are skipped. The first module to define
/// a key wins.
fn flatten_summary(result: &Value) -> InfoMap {
    let mut info = InfoMap::new();
    for module in SUMMARY_MODULES {
        let Some(Value::Object(fields)) = result.get(*module) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" {
                continue;
            }
            if let Some(value) = summary_scalar(value) {
                info.insert(key.as_str(), value);
            }
        }
    }
    info
}

fn summary_scalar(value: &Value) -> Option<InfoValue> {
    match value {
        Value::Bool(b) => Some(InfoValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(InfoValue::Number),
        Value::String(s) => Some(InfoValue::Text(s.clone())),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64).map(InfoValue::Number),
        Value::Null | Value::Array(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(body: Value) -> ChartData {
        let resp: ChartResponse = serde_json::from_value(body).unwrap();
        first_chart_result("AAPL", resp).unwrap()
    }

    #[test]
    fn chart_query_for_window() {
        let start = DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap();
        let end = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let query = YahooProvider::chart_query(&HistoryRequest::between(start, end, Interval::Daily));
        assert!(query.contains(&("period1", "1600000000".to_string())));
        assert!(query.contains(&("period2", "1700000000".to_string())));
        assert!(query.contains(&("interval", "1d".to_string())));
        assert!(query.contains(&("events", "div,splits".to_string())));
    }

    #[test]
    fn chart_query_for_range() {
        let query = YahooProvider::chart_query(&HistoryRequest::range("5y", Interval::Quarterly));
        assert!(query.contains(&("range", "5y".to_string())));
        assert!(query.contains(&("interval", "3mo".to_string())));
    }

    #[test]
    fn parses_bars_with_adjustment_and_events() {
        // 2024-01-02 and 2024-01-03 14:30 UTC, exchange offset -5h
        let data = chart(json!({
            "chart": {
                "result": [{
                    "meta": { "gmtoffset": -18000 },
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "events": {
                        "dividends": { "1704292200": { "amount": 0.24, "date": 1704292200 } },
                        "splits": { "1704205800": { "date": 1704205800, "numerator": 4, "denominator": 1, "splitRatio": "4:1" } }
                    },
                    "indicators": {
                        "quote": [{
                            "open": [10.0, 11.0, null],
                            "high": [12.0, 13.0, null],
                            "low": [9.0, 10.0, null],
                            "close": [10.0, 12.0, null],
                            "volume": [100, 200, null]
                        }],
                        "adjclose": [{ "adjclose": [5.0, 12.0, null] }]
                    }
                }],
                "error": null
            }
        }));

        let bars = parse_chart_bars(data).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 5.0);
        assert_eq!(bars[0].open, 5.0);
        assert_eq!(bars[0].stock_splits, 4.0);
        assert_eq!(bars[1].close, 12.0);
        assert_eq!(bars[1].dividends, 0.24);
        assert_eq!(bars[1].volume, 200);
    }

    #[test]
    fn chart_without_timestamps_is_empty() {
        let data = chart(json!({
            "chart": {
                "result": [{ "meta": {}, "indicators": { "quote": [{}] } }],
                "error": null
            }
        }));
        assert!(parse_chart_bars(data).unwrap().is_empty());
    }

    #[test]
    fn chart_not_found_maps_to_symbol_not_found() {
        let resp: ChartResponse = serde_json::from_value(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        }))
        .unwrap();
        let err = first_chart_result("ZZZZ", resp).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { symbol } if symbol == "ZZZZ"));
    }

    #[test]
    fn actions_are_sorted_and_split_ratio_computed() {
        let data = chart(json!({
            "chart": {
                "result": [{
                    "timestamp": [1],
                    "events": {
                        "dividends": {
                            "1700000000": { "amount": 0.25, "date": 1700000000 },
                            "1600000000": { "amount": 0.20, "date": 1600000000 }
                        },
                        "splits": {
                            "1598880600": { "date": 1598880600, "numerator": 1, "denominator": 2 }
                        }
                    },
                    "indicators": { "quote": [{ "close": [1.0] }] }
                }],
                "error": null
            }
        }));
        let actions = parse_chart_actions(&data);
        assert_eq!(actions.dividends.len(), 2);
        assert!(actions.dividends[0].date < actions.dividends[1].date);
        assert_eq!(actions.dividends[0].value, 0.20);
        assert_eq!(actions.splits[0].value, 0.5);
    }

    #[test]
    fn flattens_summary_modules() {
        let result = json!({
            "financialData": {
                "maxAge": 86400,
                "currentPrice": { "raw": 189.5, "fmt": "189.50" },
                "totalCash": { "raw": 6.7e10, "fmt": "67B" },
                "recommendationKey": "buy",
                "targetHighPrice": {}
            },
            "summaryDetail": {
                "marketCap": { "raw": 2.9e12 },
                "tradeable": false
            },
            "price": {
                "marketCap": { "raw": 1.0 },
                "currency": "USD"
            },
            "assetProfile": {
                "sector": "Technology",
                "companyOfficers": [{ "name": "x" }]
            }
        });
        let info = flatten_summary(&result);
        assert_eq!(info.get("currentPrice"), Some(&InfoValue::Number(189.5)));
        // summaryDetail precedes price
        assert_eq!(info.get("marketCap"), Some(&InfoValue::Number(2.9e12)));
        assert_eq!(info.get("recommendationKey"), Some(&InfoValue::Text("buy".into())));
        assert_eq!(info.get("tradeable"), Some(&InfoValue::Bool(false)));
        assert_eq!(info.get("sector"), Some(&InfoValue::Text("Technology".into())));
        assert!(!info.contains_key("maxAge"));
        assert!(!info.contains_key("targetHighPrice"));
        assert!(!info.contains_key("companyOfficers"));

        let keys: Vec<&str> = info.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"sector"));
        assert_eq!(keys.last(), Some(&"currency"));
    }

    #[test]
    fn bar_dates_follow_daylight_saving() {
        // Local midnight in New York: EST, EDT, EDT.
        let data = chart(json!({
            "chart": {
                "result": [{
                    "meta": { "gmtoffset": -18000, "exchangeTimezoneName": "America/New_York" },
                    "timestamp": [1704085200, 1711944000, 1719806400],
                    "indicators": {
                        "quote": [{
                            "open": [1.0, 2.0, 3.0],
                            "high": [1.0, 2.0, 3.0],
                            "low": [1.0, 2.0, 3.0],
                            "close": [1.0, 2.0, 3.0],
                            "volume": [10, 20, 30]
                        }]
                    }
                }],
                "error": null
            }
        }));
        let dates: Vec<String> = parse_chart_bars(data)
            .unwrap()
            .iter()
            .map(|b| b.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-04-01", "2024-07-01"]);
    }

    #[test]
    fn unknown_timezone_falls_back_to_gmtoffset() {
        let meta = ChartMeta {
            gmtoffset: Some(-18000),
            exchange_timezone_name: Some("Mars/Olympus_Mons".into()),
        };
        let clock = ExchangeClock::from_meta(Some(&meta));
        assert!(matches!(clock, ExchangeClock::Fixed(-18000)));
        assert_eq!(
            clock.date(1704085200).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn actions_before_window_are_not_attached() {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        let mut bars = vec![
            Bar::new(d(3, 1), 1.0, 1.0, 1.0, 1.0, 1),
            Bar::new(d(3, 4), 1.0, 1.0, 1.0, 1.0, 1),
        ];
        let actions = CorporateActions {
            dividends: vec![DatedValue::new(d(2, 9), 0.24), DatedValue::new(d(3, 2), 0.25)],
            splits: vec![DatedValue::new(d(1, 5), 4.0), DatedValue::new(d(3, 4), 2.0)],
        };
        attach_actions(&mut bars, &actions);
        assert_eq!(bars[0].dividends, 0.25);
        assert_eq!(bars[0].stock_splits, 0.0);
        assert_eq!(bars[1].dividends, 0.0);
        assert_eq!(bars[1].stock_splits, 2.0);
    }

    #[test]
    fn success_status_is_not_an_error() {
        assert!(status_error(StatusCode::OK, None, "AAPL").is_none());
    }

    #[test]
    fn not_found_status_is_symbol_not_found() {
        let err = status_error(StatusCode::NOT_FOUND, None, "ZZZZ").unwrap();
        assert!(matches!(err, DataError::SymbolNotFound { symbol } if symbol == "ZZZZ"));
    }

    #[test]
    fn unauthorized_status_needs_authentication() {
        let err = status_error(StatusCode::UNAUTHORIZED, None, "AAPL").unwrap();
        assert!(matches!(err, DataError::AuthenticationRequired(_)));
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let header = HeaderValue::from_static("17");
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, Some(&header), "AAPL").unwrap();
        assert!(matches!(err, DataError::RateLimited { retry_after_secs: 17 }));
    }

    #[test]
    fn rate_limit_without_usable_retry_after_uses_default() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, None, "AAPL").unwrap();
        assert!(matches!(err, DataError::RateLimited { retry_after_secs: 60 }));

        let header = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, Some(&header), "AAPL").unwrap();
        assert!(matches!(err, DataError::RateLimited { retry_after_secs: 60 }));
    }

    #[test]
    fn other_statuses_are_http_errors() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, None, "AAPL").unwrap();
        assert!(matches!(err, DataError::Http { status: 500, symbol } if symbol == "AAPL"));
        let err = status_error(StatusCode::FORBIDDEN, None, "AAPL").unwrap();
        assert!(matches!(err, DataError::Http { status: 403, .. }));
    }

    #[test]
    fn crumb_is_trimmed() {
        assert_eq!(validate_crumb("  aB3.xYz/9\n").unwrap(), "aB3.xYz/9");
    }

    #[test]
    fn bad_crumbs_need_authentication() {
        for body in ["", "   ", "<html><body>Too Many Requests</body></html>", "Invalid Cookie"] {
            let err = validate_crumb(body).unwrap_err();
            assert!(
                matches!(err, DataError::AuthenticationRequired(_)),
                "body {body:?} gave {err:?}"
            );
        }
    }
}
