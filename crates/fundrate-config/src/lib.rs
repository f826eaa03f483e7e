//! # Fundrate Config
//!
//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! [ledger]
//! transfers = "data/transfers.csv"
//! valuations = "data/valuations.csv"
//!
//! [window]
//! start = "2020-01-01"
//!
//! [roster]
//! funds = ["Fondo A", "Fondo B"]
//! benchmarks = ["CLFCLP", "TPM"]
//!
//! [performance]
//! policy = "capture"
//!
//! [fetch.yahoo]
//! enabled = false
//! ```
//!
//! Every section and field is optional; a missing file yields the defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod error;

pub use app::{AppConfig, LedgerConfig, PerformanceConfig, WindowConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult};
