//! Shared plumbing for the StockReport binaries.
//!
//! The binaries stay thin: argument parsing lives in each `main`, the
//! pipeline steps live here so they can be driven by a fixture provider.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stockreport_core::config::FetchConfig;
use stockreport_core::data::{fetch_ticker, MarketDataProvider};
use stockreport_report::build_report;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`), so
/// stdout carries only the user-facing progress lines.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Load the fetch config, defaulting when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<FetchConfig> {
    FetchConfig::load(path).context("failed to load fetch config")
}

/// Fetch `ticker` and write its report into `output_dir`.
///
/// A fetch failure is reported on `out` and yields `Ok(None)`; only a
/// report-writing failure is an error.
pub fn run_fetch<W: Write>(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    config: &FetchConfig,
    output_dir: &Path,
    out: &mut W,
) -> Result<Option<PathBuf>> {
    let ticker = ticker.to_uppercase();
    writeln!(out, "Fetching data for {ticker}...")?;

    let record = match fetch_ticker(provider, &ticker, config) {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(ticker = %ticker, error = %e, "fetch failed");
            writeln!(out, "Error fetching data for {ticker}: {e}")?;
            writeln!(out, "Failed to fetch data for {ticker}")?;
            return Ok(None);
        }
    };

    let path = build_report(&ticker, &record, output_dir)
        .with_context(|| format!("failed to write report for {ticker}"))?;
    writeln!(out, "Excel file created: {}", path.display())?;
    writeln!(out, "Done!")?;
    Ok(Some(path))
}

/// Usage text printed when the fetcher gets the wrong number of arguments.
pub fn write_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Usage: stock_data_fetcher <TICKER>")?;
    writeln!(out, "Example: stock_data_fetcher AAPL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockreport_core::data::{sample_record, FixtureProvider};

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn successful_run_prints_progress() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FixtureProvider::new(sample_record("AAPL"));
        let mut out = Vec::new();
        let path = run_fetch(&provider, "aapl", &FetchConfig::default(), dir.path(), &mut out)
            .unwrap()
            .unwrap();

        assert!(path.ends_with("AAPL_stock_data.xlsx"));
        assert!(path.exists());
        let text = output(out);
        assert!(text.starts_with("Fetching data for AAPL...\n"));
        assert!(text.contains(&format!("Excel file created: {}\n", path.display())));
        assert!(text.ends_with("Done!\n"));
    }

    #[test]
    fn failed_fetch_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FixtureProvider::new(sample_record("AAPL"));
        let mut out = Vec::new();
        let result =
            run_fetch(&provider, "ZZZZ", &FetchConfig::default(), dir.path(), &mut out).unwrap();

        assert!(result.is_none());
        assert!(output(out).contains("Failed to fetch data for ZZZZ"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn usage_lines() {
        let mut out = Vec::new();
        write_usage(&mut out).unwrap();
        assert_eq!(
            output(out),
            "Usage: stock_data_fetcher <TICKER>\nExample: stock_data_fetcher AAPL\n"
        );
    }
}
