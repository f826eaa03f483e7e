//! Fetch command implementation.
//!
//! Downloads the configured market series and writes the market-data file
//! read by `performance` for benchmarks.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundrate_core::{SeriesFrame, TableSink};
use fundrate_ext_file::CsvTableSink;
use fundrate_fetch::fetch_data;

use crate::cli::OutputFormat;
use crate::commands::{resolve_window, Context};
use crate::output::{display_observation, print_header, print_output};

/// Arguments for the fetch command.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// First date (YYYY-MM-DD). Defaults to the configured start.
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date (YYYY-MM-DD). Defaults to the configured end or today.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output CSV. Defaults to the configured market-data path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also download the Yahoo tickers
    #[arg(long)]
    pub yahoo: bool,
}

/// Coverage of one downloaded column.
#[derive(Debug, Serialize, Tabled)]
struct SeriesSummary {
    #[tabled(rename = "Series")]
    column: String,
    #[tabled(rename = "Observations")]
    observations: usize,
    #[tabled(rename = "First", display_with = "display_observation")]
    first: Option<f64>,
    #[tabled(rename = "Last", display_with = "display_observation")]
    last: Option<f64>,
}

/// Execute the fetch command.
pub fn execute(args: FetchArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let window = resolve_window(config.window, args.start.as_deref(), args.end.as_deref())?;

    let mut settings = config.fetch.clone();
    if args.yahoo {
        settings.yahoo.enabled = true;
    }

    let frame = fetch_data(&settings, window.start, window.end)?;

    let sink = CsvTableSink::new(args.output.unwrap_or(config.ledger.market_data));
    sink.write_table(&frame)?;
    ctx.announce(&format!(
        "{} days of {} series written to {}",
        frame.len(),
        frame.width(),
        sink.path().display()
    ));

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header(&format!("Market data {window}"));
    }
    print_output(&summarize(&frame), ctx.format)?;

    Ok(())
}

fn summarize(frame: &SeriesFrame) -> Vec<SeriesSummary> {
    frame
        .columns()
        .map(|(name, values)| SeriesSummary {
            column: name.to_string(),
            observations: values.iter().flatten().count(),
            first: values.iter().flatten().next().copied(),
            last: values.iter().rev().flatten().next().copied(),
        })
        .collect()
}
