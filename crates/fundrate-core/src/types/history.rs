//! Aligned cashflow and valuation history of a single entity.

use serde::{Deserialize, Serialize};

use super::date::Date;
use super::series::DateSeries;
use crate::error::{CoreError, CoreResult};

/// Transfer and valuation history of one fund or benchmark.
///
/// Both series share an identical, non-empty date index. Funds carry their
/// transfer ledger in `cashflow`; benchmarks carry a zero series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityHistory {
    name: String,
    cashflow: DateSeries,
    valuation: DateSeries,
}

impl EntityHistory {
    /// Pairs a cashflow and a valuation series.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptySeries` for an empty index and
    /// `CoreError::MisalignedSeries` if the two indices differ.
    pub fn new(
        name: impl Into<String>,
        cashflow: DateSeries,
        valuation: DateSeries,
    ) -> CoreResult<Self> {
        let name = name.into();
        if valuation.is_empty() {
            return Err(CoreError::empty_series(format!("valuation of '{name}'")));
        }
        if cashflow.len() != valuation.len() {
            return Err(CoreError::misaligned(
                name,
                format!(
                    "cashflow has {} rows, valuation has {}",
                    cashflow.len(),
                    valuation.len()
                ),
            ));
        }
        if let Some((c, v)) = cashflow
            .dates()
            .iter()
            .zip(valuation.dates())
            .find(|(c, v)| c != v)
        {
            return Err(CoreError::misaligned(
                name,
                format!("cashflow date {c} does not match valuation date {v}"),
            ));
        }
        Ok(Self {
            name,
            cashflow,
            valuation,
        })
    }

    /// A history with no transfers: the whole return comes from valuation changes.
    pub fn valuation_only(name: impl Into<String>, valuation: DateSeries) -> CoreResult<Self> {
        let cashflow = valuation.zeros_like();
        Self::new(name, cashflow, valuation)
    }

    /// Entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transfer series.
    #[must_use]
    pub fn cashflow(&self) -> &DateSeries {
        &self.cashflow
    }

    /// Valuation series.
    #[must_use]
    pub fn valuation(&self) -> &DateSeries {
        &self.valuation
    }

    /// The shared date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        self.valuation.dates()
    }

    /// The history observed through `date` (inclusive), or `None` when no
    /// observation precedes it.
    #[must_use]
    pub fn through(&self, date: Date) -> Option<Self> {
        let valuation = self.valuation.through(date);
        if valuation.is_empty() {
            return None;
        }
        Some(Self {
            name: self.name.clone(),
            cashflow: self.cashflow.through(date),
            valuation,
        })
    }
}
