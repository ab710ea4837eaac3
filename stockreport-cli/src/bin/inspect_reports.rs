//! `inspect_reports` — print the sheet structure of existing xlsx files.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stockreport_cli::init_logging;
use stockreport_report::{inspect_many, DEFAULT_FILES};

#[derive(Parser)]
#[command(
    name = "inspect_reports",
    about = "Show sheet names, shapes, columns and first rows of xlsx files"
)]
struct Cli {
    /// Files to inspect. Defaults to the usual report names in the current directory.
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let files = if cli.files.is_empty() {
        DEFAULT_FILES.into_iter().map(PathBuf::from).collect()
    } else {
        cli.files
    };
    inspect_many(&files, &mut std::io::stdout().lock())?;
    Ok(())
}
