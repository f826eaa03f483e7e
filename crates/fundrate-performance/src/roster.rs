//! The funds and benchmarks a deployment tracks.

use serde::{Deserialize, Serialize};

/// Names of the tracked funds and benchmarks, in output order.
///
/// Fund names are ledger column names; benchmark names are market-data
/// column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRoster {
    /// Funds with a transfer ledger.
    pub funds: Vec<String>,
    /// Benchmarks with a valuation history only.
    pub benchmarks: Vec<String>,
}

impl Default for EntityRoster {
    fn default() -> Self {
        Self {
            funds: ["Fondo A", "Fondo B", "Fondo C", "Fondo D", "Fondo E"]
                .into_iter()
                .map(String::from)
                .collect(),
            benchmarks: ["CLFCLP", "USDCLP OBS", "TPM", "S&P 500"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EntityRoster {
    /// Creates a roster from explicit name lists.
    pub fn new<F, B>(funds: F, benchmarks: B) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            funds: funds.into_iter().map(Into::into).collect(),
            benchmarks: benchmarks.into_iter().map(Into::into).collect(),
        }
    }

    /// A roster without benchmarks.
    #[must_use]
    pub fn funds_only(mut self) -> Self {
        self.benchmarks.clear();
        self
    }

    /// A roster without funds.
    #[must_use]
    pub fn benchmarks_only(mut self) -> Self {
        self.funds.clear();
        self
    }

    /// Returns true if the roster tracks nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty() && self.benchmarks.is_empty()
    }
}
