//! Fundrate CLI - fund and benchmark performance from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Since-inception IRR tables for the configured funds and benchmarks
//! fundrate performance --start 2022-01-01
//!
//! # Download UF, observed dollar and TPM into the market-data file
//! fundrate fetch --start 2024-01-01 --end 2024-06-30
//!
//! # Rate of an explicit cashflow list
//! fundrate irr --flow 2023-01-01:-1000 --flow 2024-01-01:1100
//!
//! # Write the default configuration
//! fundrate config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config: cli.config,
    };

    match cli.command {
        Commands::Performance(args) => commands::performance::execute(args, &ctx)?,
        Commands::Fetch(args) => commands::fetch::execute(args, &ctx)?,
        Commands::Irr(args) => commands::irr::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output stay clean on stdout.
fn init_tracing(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "fundrate=debug"
    } else if quiet {
        "fundrate=warn"
    } else {
        "fundrate=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| fallback.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
