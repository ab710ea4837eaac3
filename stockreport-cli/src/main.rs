//! `stock_data_fetcher` — fetch one ticker and write `<TICKER>_stock_data.xlsx`.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stockreport_cli::{init_logging, load_config, run_fetch, write_usage};
use stockreport_core::data::YahooProvider;

#[derive(Parser)]
#[command(
    name = "stock_data_fetcher",
    about = "Fetch stock data from Yahoo Finance and write a multi-sheet xlsx report"
)]
struct Cli {
    /// Ticker symbol (e.g., AAPL). Exactly one is expected.
    tickers: Vec<String>,

    /// Path to a TOML fetch config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the report. Defaults to the current directory.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    let [ticker] = cli.tickers.as_slice() else {
        write_usage(&mut stdout)?;
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let provider = YahooProvider::new(&config)?;
    run_fetch(&provider, ticker, &config, &cli.output_dir, &mut stdout)?;
    Ok(())
}
