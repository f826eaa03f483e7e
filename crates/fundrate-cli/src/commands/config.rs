//! Config command implementation.
//!
//! Shows, locates and creates the TOML configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use fundrate_config::AppConfig;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the configuration in effect
    Show,

    /// Show configuration file location
    Path,

    /// Write the default configuration
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (defaults to the configuration file in effect)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args, ctx),
    }
}

/// Show the configuration in effect.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match ctx.format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&settings(&config), ctx.format)?;
        }
        OutputFormat::Csv => print_output(&settings(&config), ctx.format)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Minimal => print!("{}", config.to_toml()?),
    }

    Ok(())
}

/// Flattened view of the settings that matter day to day.
fn settings(config: &AppConfig) -> Vec<KeyValue> {
    let window_end = config
        .window
        .end
        .map_or_else(|| "today".to_string(), |d| d.to_string());
    let bcentral: Vec<&str> = config
        .fetch
        .bcentral
        .series
        .iter()
        .map(|s| s.new_column_name.as_str())
        .collect();

    vec![
        KeyValue::new("ledger.transfers", config.ledger.transfers.display().to_string()),
        KeyValue::new("ledger.valuations", config.ledger.valuations.display().to_string()),
        KeyValue::new("ledger.market_data", config.ledger.market_data.display().to_string()),
        KeyValue::new("ledger.fund_output", config.ledger.fund_output.display().to_string()),
        KeyValue::new(
            "ledger.benchmark_output",
            config.ledger.benchmark_output.display().to_string(),
        ),
        KeyValue::new("window.start", config.window.start.to_string()),
        KeyValue::new("window.end", window_end),
        KeyValue::new("roster.funds", config.roster.funds.join(", ")),
        KeyValue::new("roster.benchmarks", config.roster.benchmarks.join(", ")),
        KeyValue::new("performance.policy", config.performance.policy.to_string()),
        KeyValue::new(
            "performance.solver.method",
            config.performance.solver.method.name(),
        ),
        KeyValue::new(
            "performance.solver.brackets",
            format!("{:?}", config.performance.solver.brackets),
        ),
        KeyValue::new("fetch.bcentral.series", bcentral.join(", ")),
        KeyValue::new("fetch.yahoo.enabled", config.fetch.yahoo.enabled.to_string()),
    ]
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = ctx.config_path();
    if ctx.format != OutputFormat::Table {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = args.path.unwrap_or_else(|| ctx.config_path());
    if path.exists() && !args.force {
        return Err(CliError::FileExists(path.display().to_string()).into());
    }
    AppConfig::default().save(&path)?;
    ctx.announce(&format!("Default configuration written to {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_cover_every_section() {
        let rows = settings(&AppConfig::default());
        let keys: Vec<&str> = rows.iter().map(|kv| kv.key.as_str()).collect();
        for prefix in ["ledger.", "window.", "roster.", "performance.", "fetch."] {
            assert!(keys.iter().any(|k| k.starts_with(prefix)), "{prefix}");
        }
        let end = rows.iter().find(|kv| kv.key == "window.end").unwrap();
        assert_eq!(end.value, "today");
    }
}
