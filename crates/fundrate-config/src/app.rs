//! Application configuration sections.

use std::fs;
use std::path::{Path, PathBuf};

use fundrate_core::{Date, DateRange};
use fundrate_fetch::FetchSettings;
use fundrate_performance::prelude::{
    EntityRoster, FailurePolicy, IrrSolver, IrrSolverConfig, PerformanceTableBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "fundrate.toml";

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output files.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Evaluation window.
    #[serde(default)]
    pub window: WindowConfig,

    /// Funds and benchmarks to evaluate.
    #[serde(default)]
    pub roster: EntityRoster,

    /// Failure policy and solver settings.
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Market data sources.
    #[serde(default)]
    pub fetch: FetchSettings,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Locations of the ledger, the market data and the output tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Wide CSV of fund transfers.
    #[serde(default = "default_transfers")]
    pub transfers: PathBuf,

    /// Wide CSV of fund valuations.
    #[serde(default = "default_valuations")]
    pub valuations: PathBuf,

    /// Market-data CSV written by `fetch` and read for benchmarks.
    #[serde(default = "default_market_data")]
    pub market_data: PathBuf,

    /// Fund performance table.
    #[serde(default = "default_fund_output")]
    pub fund_output: PathBuf,

    /// Benchmark performance table.
    #[serde(default = "default_benchmark_output")]
    pub benchmark_output: PathBuf,
}

fn default_transfers() -> PathBuf {
    PathBuf::from("data/transfers.csv")
}

fn default_valuations() -> PathBuf {
    PathBuf::from("data/valuations.csv")
}

fn default_market_data() -> PathBuf {
    PathBuf::from("data/market_data.csv")
}

fn default_fund_output() -> PathBuf {
    PathBuf::from("output/fund_performance.csv")
}

fn default_benchmark_output() -> PathBuf {
    PathBuf::from("output/benchmark_performance.csv")
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            transfers: default_transfers(),
            valuations: default_valuations(),
            market_data: default_market_data(),
            fund_output: default_fund_output(),
            benchmark_output: default_benchmark_output(),
        }
    }
}

/// Evaluation window. An open end means today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// First date considered.
    #[serde(default = "default_start")]
    pub start: Date,

    /// Last date considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
}

fn default_start() -> Date {
    Date::from_ymd(2020, 1, 1).unwrap_or_else(|_| Date::epoch())
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: None,
        }
    }
}

impl WindowConfig {
    /// Replaces whichever bounds are given.
    #[must_use]
    pub fn with_overrides(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        if let Some(start) = start {
            self.start = start;
        }
        if end.is_some() {
            self.end = end;
        }
        self
    }

    /// The window, closing an open end at today's date.
    pub fn resolve(&self) -> ConfigResult<DateRange> {
        self.resolve_at(Date::today())
    }

    /// The window, closing an open end at `today`.
    pub fn resolve_at(&self, today: Date) -> ConfigResult<DateRange> {
        Ok(DateRange::new(self.start, self.end.unwrap_or(today))?)
    }
}

/// How performance tables are computed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// What to do when a cell cannot be solved.
    #[serde(default)]
    pub policy: FailurePolicy,

    /// Bracket list, residual check and root-finder settings.
    #[serde(default)]
    pub solver: IrrSolverConfig,
}

impl PerformanceConfig {
    /// A table builder with these settings.
    #[must_use]
    pub fn builder(&self) -> PerformanceTableBuilder {
        PerformanceTableBuilder::new()
            .with_solver(IrrSolver::with_config(self.solver.clone()))
            .with_policy(self.policy)
    }
}
