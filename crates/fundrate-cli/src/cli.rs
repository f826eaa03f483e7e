//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, FetchArgs, IrrArgs, PerformanceArgs};

/// Fundrate - since-inception IRR and effective yield of funds and benchmarks
#[derive(Parser)]
#[command(name = "fundrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./fundrate.toml, then the user config directory)
    #[arg(short, long, global = true, env = "FUNDRATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the fund and benchmark performance tables
    Performance(PerformanceArgs),

    /// Download market data into the market-data file
    Fetch(FetchArgs),

    /// Rate of return of an explicit dated cashflow list
    Irr(IrrArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
