//! # Fundrate Performance
//!
//! Money-weighted returns for funds and benchmarks.
//!
//! The crate turns a transfer ledger plus a valuation history into a
//! continuously compounded internal rate of return and the matching
//! effective yield, and repeats that computation for every date and every
//! tracked entity to produce since-inception performance tables.
//!
//! - [`cashflow`]: effective cashflow and day offsets of a history
//! - [`irr`]: `npv`, the closed-form two-flow solve and the bracketed
//!   numerical solve
//! - [`table`]: fund and benchmark performance tables
//! - [`roster`] and [`policy`]: which entities to evaluate, and what to do
//!   when a cell cannot be solved
//!
//! ## Example
//!
//! ```rust
//! use fundrate_core::prelude::*;
//! use fundrate_performance::prelude::*;
//!
//! let d0 = Date::from_ymd(2023, 1, 1).unwrap();
//! let d1 = Date::from_ymd(2024, 1, 1).unwrap();
//! let valuation = DateSeries::new(vec![d0, d1], vec![1000.0, 1100.0]).unwrap();
//! let history = EntityHistory::valuation_only("Fondo A", valuation).unwrap();
//!
//! let flows = get_effective_cashflow(history.cashflow(), history.valuation()).unwrap();
//! let result = solve_irr(&flows).unwrap();
//!
//! assert!((result.effective_yield - 0.10).abs() < 1e-12);
//! assert!((result.rate - 1.1_f64.ln()).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod cashflow;
pub mod error;
pub mod irr;
pub mod policy;
pub mod roster;
pub mod table;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflow::{get_effective_cashflow, EffectiveCashflow};
    pub use crate::error::{PerformanceError, PerformanceResult};
    pub use crate::irr::{
        npv, simple_irr_solve, solve_irr, IrrMethod, IrrResult, IrrSolver, IrrSolverConfig,
    };
    pub use crate::policy::FailurePolicy;
    pub use crate::roster::EntityRoster;
    pub use crate::table::{
        get_benchmark_performance, get_fund_performance, CellFailure, PerformanceReport,
        PerformanceTable, PerformanceTableBuilder,
    };
}

pub use error::{PerformanceError, PerformanceResult};
