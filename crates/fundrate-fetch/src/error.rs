//! Fetcher error types.

use fundrate_core::CoreError;
use thiserror::Error;

/// A specialized Result type for market data fetching.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors raised while downloading or parsing market data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or its body not read.
    #[error("HTTP request to {url} failed: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code.
        status: u16,
    },

    /// The response holds no data table.
    #[error("No data table in response from {url}")]
    NoTable {
        /// Requested URL.
        url: String,
    },

    /// The table has no row for the requested series.
    #[error("Series '{series}' not found in {url}")]
    MissingSeries {
        /// Expected series name.
        series: String,
        /// Requested URL.
        url: String,
    },

    /// A label, number or payload could not be parsed.
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed.
        context: String,
        /// Description of the problem.
        message: String,
    },

    /// Assembling the frame failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FetchError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn http(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Http {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
