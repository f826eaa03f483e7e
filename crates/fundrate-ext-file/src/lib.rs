//! # Fundrate Ext File
//!
//! File-based sources and sinks for the performance engine:
//!
//! - [`CsvLedgerSource`]: fund transfers and valuations from two wide CSV files
//! - [`CsvMarketDataSource`]: benchmark valuations from the market-data CSV
//! - [`CsvTableSink`]: writes any date-indexed table
//!
//! Every file is a wide table with a `Date` column (`YYYY-MM-DD`) followed by
//! one column per entity. Empty cells are missing values.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod frame_csv;
mod ledger;
mod market_data;
mod sink;

pub use error::{FileError, FileResult};
pub use frame_csv::{read_frame, write_frame, DATE_COLUMN};
pub use ledger::CsvLedgerSource;
pub use market_data::CsvMarketDataSource;
pub use sink::CsvTableSink;
