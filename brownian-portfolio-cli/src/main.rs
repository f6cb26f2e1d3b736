//! # bp - streaming portfolio optimizer CLI
//!
//! Drives [`brownian_portfolio::PortfolioEngine`] over a file or stdin of
//! `(timestamp, ticker, price)` records and writes tab-separated interval
//! summaries to stdout.
//!
//! ## Quick Start
//!
//! ```bash
//! bp run --input prices.tsv --decision-method avg-rms
//! bp run --decision-method random --random-seed 42 --minimum-concurrent 3 --maximum-concurrent 3 < prices.tsv
//! ```

mod config;
mod error;
mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use brownian_portfolio::dispatcher::{dispatch, parse_line};
use brownian_portfolio::PortfolioEngine;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::EngineArgs;
use error::{CliError, Result};
use output::LineWriter;

/// Streaming portfolio optimizer over a random-walk model of equity prices.
#[derive(Debug, Parser)]
#[command(name = "bp", version, about)]
struct Cli {
    /// Input file of records; reads stdin when omitted.
    #[arg(long)]
    input: Option<String>,

    /// Enable debug-level logging.
    #[arg(long)]
    verbose: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.engine.into_engine_config()?;
    let mut engine = PortfolioEngine::new(config)?;

    let records: Box<dyn BufRead> = match cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).map_err(CliError::InputOpen)?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let lines: Vec<String> = records.lines().collect::<io::Result<Vec<_>>>()?;
    let records = lines.iter().filter_map(|line| parse_line(line));

    let mut sink = LineWriter::new(io::stdout());
    dispatch(records, &mut engine, &mut sink)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bp: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
