//! `verify_report` — print live Yahoo values next to a generated report's values.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stockreport_cli::{init_logging, load_config};
use stockreport_core::data::YahooProvider;
use stockreport_report::{render_verify, report_file_name, verify};

#[derive(Parser)]
#[command(
    name = "verify_report",
    about = "Spot-check a generated report against live Yahoo Finance data"
)]
struct Cli {
    /// Ticker symbol.
    #[arg(default_value = "AAPL")]
    ticker: String,

    /// Report to check. Defaults to `<TICKER>_stock_data.xlsx`.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Path to a TOML fetch config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let ticker = cli.ticker.to_uppercase();
    let report = cli
        .report
        .unwrap_or_else(|| PathBuf::from(report_file_name(&ticker)));

    let config = load_config(cli.config.as_deref())?;
    let provider = YahooProvider::new(&config)?;
    let result = verify(&provider, &ticker, &report)?;
    print!("{}", render_verify(&result));
    Ok(())
}
