//! Verifier — live provider values next to the values stored in a report.
//!
//! Every section is independent: a failure is recorded in that section and
//! the rest still run. Nothing is asserted; the output is for a human.

use std::fmt::Write as _;
use std::path::Path;

use calamine::Data;
use stockreport_core::data::{DataError, HistoryRequest, Interval, MarketDataProvider};
use stockreport_core::domain::{InfoMap, InfoValue};

use crate::builder::main_sheet::{LABEL_COL, VALUE_COL};
use crate::builder::{HISTORICAL_DATA, MAIN};
use crate::error::ReportError;
use crate::inspect::{cell_text, open, read_sheet};

/// Live fields: (label, info key, currency prefix, thousands separators).
const LIVE_FIELDS: [(&str, &str, &str, bool); 5] = [
    ("Current Price", "currentPrice", "$", false),
    ("Market Cap", "marketCap", "$", true),
    ("P/E Ratio", "trailingPE", "", false),
    ("EPS", "trailingEps", "$", false),
    ("Shares Outstanding", "sharesOutstanding", "", true),
];

/// What the report's Historical Data sheet says.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalCheck {
    pub points: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub latest_close: Option<f64>,
}

#[derive(Debug)]
pub struct VerifyReport {
    pub ticker: String,
    pub live_info: Result<InfoMap, DataError>,
    /// `label: value` pairs from the Main sheet.
    pub report_main: Result<Vec<(String, String)>, ReportError>,
    pub historical: Result<HistoricalCheck, ReportError>,
    pub live_close: Result<Option<f64>, DataError>,
}

pub fn verify(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    report_path: &Path,
) -> Result<VerifyReport, ReportError> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(DataError::InvalidTicker(ticker.to_string()).into());
    }

    tracing::info!(ticker, report = %report_path.display(), "verifying report");
    let live_info = provider.info(ticker);
    let report_main = read_main_pairs(report_path);
    let historical = read_historical(report_path);
    let live_close = provider
        .history(ticker, &HistoryRequest::range("5d", Interval::Daily))
        .map(|bars| bars.last().map(|b| b.close));

    Ok(VerifyReport {
        ticker: ticker.to_string(),
        live_info,
        report_main,
        historical,
        live_close,
    })
}

/// Rows of the Main sheet whose label column is non-empty.
pub fn read_main_pairs(path: &Path) -> Result<Vec<(String, String)>, ReportError> {
    let mut workbook = open(path)?;
    let range = read_sheet(&mut workbook, MAIN)?;
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Ok(Vec::new());
    };

    let text_at = |row: u32, col: u16| {
        range
            .get_value((row, u32::from(col)))
            .map(cell_text)
            .unwrap_or_default()
    };
    Ok((start.0..=end.0)
        .filter_map(|row| {
            let label = text_at(row, LABEL_COL);
            (!label.is_empty()).then(|| (label, text_at(row, VALUE_COL)))
        })
        .collect())
}

/// Count, date span and last close of the Historical Data sheet.
pub fn read_historical(path: &Path) -> Result<HistoricalCheck, ReportError> {
    let mut workbook = open(path)?;
    let range = read_sheet(&mut workbook, HISTORICAL_DATA)?;
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|h| h.iter().map(cell_text).collect())
        .unwrap_or_default();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::MissingColumn {
                sheet: HISTORICAL_DATA.to_string(),
                column: name.to_string(),
            })
    };
    let date_col = column("Date")?;
    let close_col = column("Close")?;

    let mut check = HistoricalCheck {
        points: 0,
        first_date: None,
        last_date: None,
        latest_close: None,
    };
    for row in rows {
        check.points += 1;
        let date = row.get(date_col).map(cell_text).unwrap_or_default();
        if !date.is_empty() {
            if check.first_date.as_ref().map_or(true, |d| date < *d) {
                check.first_date = Some(date.clone());
            }
            if check.last_date.as_ref().map_or(true, |d| date > *d) {
                check.last_date = Some(date);
            }
        }
        check.latest_close = row.get(close_col).and_then(data_f64);
    }
    Ok(check)
}

fn data_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

/// Render the four verification sections.
pub fn render_verify(report: &VerifyReport) -> String {
    let mut out = String::with_capacity(1024);

    let _ = writeln!(out, "=== LIVE YAHOO FINANCE DATA ===");
    match &report.live_info {
        Ok(info) => {
            for (label, key, prefix, grouped) in LIVE_FIELDS {
                let _ = writeln!(out, "{label}: {}", live_field(info.get(key), prefix, grouped));
            }
        }
        Err(e) => {
            let _ = writeln!(out, "Error fetching live data for {}: {e}", report.ticker);
        }
    }

    let _ = writeln!(out, "\n=== OUR PROGRAM OUTPUT ===");
    match &report.report_main {
        Ok(pairs) => {
            for (label, value) in pairs {
                let _ = writeln!(out, "{label}: {value}");
            }
        }
        Err(e) => {
            let _ = writeln!(out, "Error reading {MAIN} sheet: {e}");
        }
    }

    let _ = writeln!(out, "\n=== HISTORICAL DATA CHECK ===");
    match &report.historical {
        Ok(check) => {
            let _ = writeln!(out, "Historical data points: {}", check.points);
            let _ = writeln!(
                out,
                "Date range: {} to {}",
                check.first_date.as_deref().unwrap_or("N/A"),
                check.last_date.as_deref().unwrap_or("N/A")
            );
            let _ = writeln!(out, "Latest close price: {}", money(check.latest_close));
        }
        Err(e) => {
            let _ = writeln!(out, "Error reading {HISTORICAL_DATA} sheet: {e}");
        }
    }

    match &report.live_close {
        Ok(close) => {
            let _ = writeln!(out, "Live latest close: {}", money(*close));
        }
        Err(e) => {
            let _ = writeln!(out, "Error fetching live history for {}: {e}", report.ticker);
        }
    }
    out
}

fn live_field(value: Option<&InfoValue>, prefix: &str, grouped: bool) -> String {
    match value {
        None => "N/A".to_string(),
        Some(InfoValue::Number(n)) if grouped => format!("{prefix}{}", group_thousands(*n)),
        Some(v) => format!("{prefix}{v}"),
    }
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${v:.2}"))
}

/// Decimal rendering with `,` between groups of three integer digits.
pub fn group_thousands(n: f64) -> String {
    let text = n.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
