//! Configuration errors.

use std::path::PathBuf;

use fundrate_core::CoreError;
use thiserror::Error;

/// Result type of configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading, parsing or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("{path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML.
    #[error("cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// A value is well-formed but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}
