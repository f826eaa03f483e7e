//! CLI command implementations.

pub mod config;
pub mod fetch;
pub mod irr;
pub mod performance;

pub use config::ConfigArgs;
pub use fetch::FetchArgs;
pub use irr::IrrArgs;
pub use performance::PerformanceArgs;

use std::path::PathBuf;

use anyhow::Result;
use fundrate_config::{AppConfig, WindowConfig, CONFIG_FILE_NAME};
use fundrate_core::{Date, DateRange};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_success;

/// Options shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

impl Context {
    /// The configuration file in effect.
    ///
    /// An explicit `--config` wins; otherwise `./fundrate.toml`, then the
    /// user configuration directory, and finally `./fundrate.toml` again as
    /// the place a new file would go.
    pub fn config_path(&self) -> PathBuf {
        if let Some(path) = &self.config {
            return path.clone();
        }
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }
        match user_config_path() {
            Some(user) if user.exists() => user,
            _ => local,
        }
    }

    /// Loads the configuration. An explicit file must exist; an implicit
    /// one falls back to the defaults.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_path();
        let config = match &self.config {
            Some(explicit) => AppConfig::from_file(explicit)?,
            None => AppConfig::load_or_default(&path)?,
        };
        tracing::debug!(path = %path.display(), window = ?config.window, "configuration in effect");
        Ok(config)
    }

    /// Reports a completed step, unless quiet or producing machine output.
    pub fn announce(&self, message: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            print_success(message);
        }
    }
}

/// `<config dir>/fundrate/fundrate.toml`.
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("fundrate").join(CONFIG_FILE_NAME))
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Applies `--start`/`--end` to the configured window and closes it.
pub fn resolve_window(
    window: WindowConfig,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;
    Ok(window.with_overrides(start, end).resolve()?)
}
