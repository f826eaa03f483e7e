//! Performance command implementation.
//!
//! Builds the since-inception IRR and effective-yield tables of the roster's
//! funds and benchmarks and writes them next to the ledger.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundrate_core::{HistorySource, TableSink};
use fundrate_ext_file::{CsvLedgerSource, CsvMarketDataSource, CsvTableSink};
use fundrate_performance::prelude::{
    get_benchmark_performance, get_fund_performance, FailurePolicy, PerformanceReport,
};

use crate::cli::OutputFormat;
use crate::commands::{resolve_window, Context};
use crate::output::{display_percent, print_header, print_output, print_warning};

/// Arguments for the performance command.
#[derive(Args, Debug)]
pub struct PerformanceArgs {
    /// First date of the window (YYYY-MM-DD). Defaults to the configured start.
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date of the window (YYYY-MM-DD). Defaults to the configured end or today.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only compute the fund table
    #[arg(long, conflicts_with = "benchmarks_only")]
    pub funds_only: bool,

    /// Only compute the benchmark table
    #[arg(long)]
    pub benchmarks_only: bool,

    /// Leave unsolvable cells blank instead of aborting
    #[arg(long)]
    pub capture_errors: bool,
}

/// Latest rate of one entity, for display.
#[derive(Debug, Serialize, Tabled)]
struct LatestRow {
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "As of")]
    date: String,
    #[tabled(rename = "IRR", display_with = "display_percent")]
    irr: f64,
    #[tabled(rename = "Yield", display_with = "display_percent")]
    effective_yield: f64,
}

/// A computed table and where it goes.
struct Output {
    kind: &'static str,
    report: PerformanceReport,
    path: PathBuf,
}

/// Execute the performance command.
pub fn execute(args: PerformanceArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let window = resolve_window(config.window, args.start.as_deref(), args.end.as_deref())?;

    let mut roster = config.roster.clone();
    if args.funds_only {
        roster = roster.funds_only();
    } else if args.benchmarks_only {
        roster = roster.benchmarks_only();
    }
    if roster.is_empty() {
        print_warning("The roster is empty; nothing to compute");
        return Ok(());
    }

    let mut performance = config.performance.clone();
    if args.capture_errors {
        performance.policy = FailurePolicy::Capture;
    }
    let builder = performance.builder();

    // Every table is computed before any is written
    let mut outputs = Vec::new();

    if !roster.funds.is_empty() {
        let ledger =
            CsvLedgerSource::open(&config.ledger.transfers, &config.ledger.valuations, &window)?;
        let histories = ledger.histories(&roster.funds)?;
        let report = get_fund_performance(&histories, &ledger.dates()?, &roster, &builder)?;
        outputs.push(Output {
            kind: "Fund",
            report,
            path: config.ledger.fund_output.clone(),
        });
    }

    if !roster.benchmarks.is_empty() {
        let market = CsvMarketDataSource::open(&config.ledger.market_data, &window)?;
        let valuations = market.valuations(&roster.benchmarks)?;
        let report = get_benchmark_performance(&valuations, &market.dates()?, &roster, &builder)?;
        outputs.push(Output {
            kind: "Benchmark",
            report,
            path: config.ledger.benchmark_output.clone(),
        });
    }

    for output in &outputs {
        let sink = CsvTableSink::new(&output.path);
        sink.write_table(&output.report.table.to_frame()?)?;
        ctx.announce(&format!(
            "{} table: {} rows written to {}",
            output.kind,
            output.report.table.len(),
            sink.path().display()
        ));
    }

    if !ctx.quiet {
        for failure in outputs.iter().flat_map(|o| &o.report.failures) {
            print_warning(&failure.to_string());
        }
    }

    let rows = latest_rows(&outputs);
    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header(&format!("Performance {window}"));
    }
    print_output(&rows, ctx.format)?;

    Ok(())
}

fn latest_rows(outputs: &[Output]) -> Vec<LatestRow> {
    let mut rows = Vec::new();
    for output in outputs {
        let table = &output.report.table;
        let date = table
            .dates()
            .last()
            .map(ToString::to_string)
            .unwrap_or_default();
        for entity in table.entities() {
            if let Some((irr, effective_yield)) = table.latest(entity) {
                rows.push(LatestRow {
                    entity: entity.clone(),
                    kind: output.kind,
                    date: date.clone(),
                    irr,
                    effective_yield,
                });
            }
        }
    }
    rows
}
