//! # Fundrate Fetch
//!
//! Builds the benchmark market-data table from external sources:
//!
//! - [`bcentral`]: daily series published as HTML tables by the Banco
//!   Central de Chile statistics site (UF, observed dollar, policy rate)
//! - [`yahoo`]: daily closes from the Yahoo chart API (off by default)
//!
//! Every series is re-indexed to calendar days and forward-filled, then all
//! series are outer-joined column-wise and sliced to the requested window.
//!
//! Requests are blocking and sequential, with no retry. The transport sits
//! behind [`HttpClient`] so parsing and assembly run offline in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod bcentral;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod yahoo;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bcentral::{BcentralSeries, BcentralSettings};
    pub use crate::client::{HttpClient, ReqwestClient};
    pub use crate::error::{FetchError, FetchResult};
    pub use crate::fetcher::{fetch_data, FetchSettings, MarketDataFetcher};
    pub use crate::yahoo::{YahooSettings, YahooTicker};
}

pub use client::{HttpClient, ReqwestClient};
pub use error::{FetchError, FetchResult};
pub use fetcher::{fetch_data, FetchSettings, MarketDataFetcher};
