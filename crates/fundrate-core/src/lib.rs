//! # Fundrate Core
//!
//! Core types and abstractions for the Fundrate performance toolkit.
//!
//! This crate provides the foundational building blocks shared by the
//! performance engine, the file adapters and the market data fetcher:
//!
//! - **Types**: `Date`, `DateSeries`, `SeriesFrame`, `EntityHistory`
//! - **Traits**: `HistorySource` and `TableSink`, the data-source and
//!   data-sink boundary of the engine
//!
//! ## Example
//!
//! ```rust
//! use fundrate_core::prelude::*;
//!
//! let d0 = Date::from_ymd(2024, 1, 1).unwrap();
//! let d1 = Date::from_ymd(2024, 12, 31).unwrap();
//! let values = DateSeries::new(vec![d0, d1], vec![1000.0, 1100.0]).unwrap();
//! assert_eq!(values.len(), 2);
//! assert_eq!(values.last(), Some((d1, 1100.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::{HistorySource, TableSink};
    pub use crate::types::{
        CashflowSeries, Date, DateRange, DateSeries, EntityHistory, SeriesFrame,
        ValuationSeries,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use traits::{HistorySource, TableSink};
pub use types::{Date, DateRange, DateSeries, EntityHistory, SeriesFrame};
