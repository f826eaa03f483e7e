//! Domain types for performance analytics.
//!
//! - [`Date`]: Calendar date, day granularity
//! - [`DateRange`]: Inclusive evaluation window
//! - [`DateSeries`]: Strictly increasing (date, value) series
//! - [`SeriesFrame`]: Date index with labelled, possibly missing columns
//! - [`EntityHistory`]: Aligned cashflow and valuation series of one entity

mod date;
mod frame;
mod history;
mod series;

pub use date::{Date, DateRange};
pub use frame::SeriesFrame;
pub use history::EntityHistory;
pub use series::DateSeries;

/// Signed transfers into (positive) or out of (negative) a holding.
pub type CashflowSeries = DateSeries;

/// Mark-to-market total value of a holding.
pub type ValuationSeries = DateSeries;
