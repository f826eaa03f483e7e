//! Effective cashflow of a fund or benchmark history.
//!
//! A valuation history is turned into a self-contained investment stream:
//! the holder "buys" the position at its first valuation, every later
//! transfer into the fund is an outflow for the holder, and the position is
//! "sold" at its last valuation. The rate that zeroes this stream is the
//! money-weighted return of the holding.

use fundrate_core::{CoreError, Date, DateSeries, EntityHistory};
use serde::{Deserialize, Serialize};

use crate::error::{PerformanceError, PerformanceResult};
use crate::irr::npv;

/// Day offsets and signed amounts of an investment stream.
///
/// Offsets are calendar days since the first date, so the first offset is
/// always zero and offsets never decrease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveCashflow {
    days: Vec<i64>,
    amounts: Vec<f64>,
}

impl EffectiveCashflow {
    /// Creates a stream from day offsets and amounts.
    ///
    /// # Errors
    ///
    /// Fails if the vectors differ in length, are empty, do not start at day
    /// zero, or decrease.
    pub fn new(days: Vec<i64>, amounts: Vec<f64>) -> PerformanceResult<Self> {
        if days.len() != amounts.len() {
            return Err(CoreError::LengthMismatch {
                dates: days.len(),
                values: amounts.len(),
            }
            .into());
        }
        match days.first() {
            None => return Err(CoreError::empty_series("effective cashflow").into()),
            Some(&first) if first != 0 => {
                return Err(PerformanceError::domain(format!(
                    "day offsets must start at 0, got {first}"
                )))
            }
            Some(_) => {}
        }
        if days.windows(2).any(|w| w[1] < w[0]) {
            return Err(PerformanceError::domain("day offsets must not decrease"));
        }
        Ok(Self { days, amounts })
    }

    /// An explicit dated stream, used as-is (no valuation substitution).
    ///
    /// Offsets are measured from the first date of `flows`.
    pub fn from_dated(flows: &DateSeries) -> PerformanceResult<Self> {
        let start = flows
            .first()
            .map(|(date, _)| date)
            .ok_or_else(|| CoreError::empty_series("dated cashflows"))?;
        Self::new(day_offsets(start, flows.dates()), flows.values().to_vec())
    }

    /// The effective cashflow of an aligned history.
    #[must_use]
    pub fn from_history(history: &EntityHistory) -> Self {
        let valuation = history.valuation().values();
        let mut amounts: Vec<f64> = history.cashflow().values().iter().map(|c| -c).collect();

        // EntityHistory guarantees a non-empty, aligned index
        let last = amounts.len() - 1;
        amounts[0] = -valuation[0];
        amounts[last] += valuation[last];

        let dates = history.dates();
        Self {
            days: day_offsets(dates[0], dates),
            amounts,
        }
    }

    /// Day offsets since the first date.
    #[must_use]
    pub fn days(&self) -> &[i64] {
        &self.days
    }

    /// Signed amounts.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Always false: a stream holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Offset of the last entry.
    #[must_use]
    pub fn last_day(&self) -> i64 {
        self.days.last().copied().unwrap_or(0)
    }

    /// Number of entries different from zero.
    #[must_use]
    pub fn non_zero_count(&self) -> usize {
        self.amounts.iter().filter(|a| **a != 0.0).count()
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    /// Net present value at a continuously compounded annual `rate`.
    #[must_use]
    pub fn npv(&self, rate: f64) -> f64 {
        npv(&self.days, &self.amounts, rate)
    }
}

/// Builds the effective cashflow of a transfer series and a valuation series.
///
/// Every transfer is negated, the first entry is replaced by the negative
/// initial valuation and the final valuation is added to the last entry.
/// A single-date history receives both adjustments on the same slot.
///
/// # Errors
///
/// Fails if the two series do not share a non-empty date index.
pub fn get_effective_cashflow(
    cashflow: &DateSeries,
    valuation: &DateSeries,
) -> PerformanceResult<EffectiveCashflow> {
    let history = EntityHistory::new("", cashflow.clone(), valuation.clone())?;
    Ok(EffectiveCashflow::from_history(&history))
}

fn day_offsets(start: Date, dates: &[Date]) -> Vec<i64> {
    dates.iter().map(|d| start.days_between(d)).collect()
}
