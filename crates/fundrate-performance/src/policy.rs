//! What to do when a table cell cannot be solved.

use serde::{Deserialize, Serialize};

/// Failure handling of the performance table builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole build on the first failing cell.
    #[default]
    FailFast,
    /// Store `NaN` in the failing cell, record the failure and continue.
    Capture,
}

impl FailurePolicy {
    /// Returns true if failures are recorded instead of propagated.
    #[must_use]
    pub fn captures(self) -> bool {
        matches!(self, Self::Capture)
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::Capture => write!(f, "capture"),
        }
    }
}
