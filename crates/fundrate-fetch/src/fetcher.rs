//! Assembly of the market-data table.

use fundrate_core::{Date, DateRange, SeriesFrame};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bcentral::{BcentralSettings, BcentralSource};
use crate::client::{HttpClient, ReqwestClient};
use crate::error::FetchResult;
use crate::yahoo::{YahooSettings, YahooSource};

/// Settings of every market-data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Banco Central series
    #[serde(default)]
    pub bcentral: BcentralSettings,

    /// Yahoo tickers
    #[serde(default)]
    pub yahoo: YahooSettings,
}

/// Downloads and joins every configured series.
pub struct MarketDataFetcher<C: HttpClient> {
    client: C,
    settings: FetchSettings,
}

impl<C: HttpClient> MarketDataFetcher<C> {
    /// Creates a fetcher over `client`.
    pub fn new(client: C, settings: FetchSettings) -> Self {
        Self { client, settings }
    }

    /// The fetcher settings.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// One column per configured series, indexed by calendar day and sliced
    /// to `range`.
    ///
    /// Yahoo series come first when enabled, then the Banco Central series.
    pub fn fetch(&self, range: &DateRange) -> FetchResult<SeriesFrame> {
        let mut frames = Vec::new();

        if self.settings.yahoo.enabled {
            let yahoo = YahooSource::new(&self.client, &self.settings.yahoo);
            // Yahoo treats the end of the period as exclusive
            let inclusive = DateRange {
                start: range.start,
                end: range.end.add_days(1),
            };
            for ticker in &self.settings.yahoo.tickers {
                frames.push(yahoo.fetch_ticker(ticker, &inclusive)?);
            }
        }

        let bcentral = BcentralSource::new(&self.client, &self.settings.bcentral);
        for series in &self.settings.bcentral.series {
            frames.push(bcentral.fetch_series(series, range)?);
        }

        let mut joined = SeriesFrame::default();
        for frame in &frames {
            joined = joined.outer_join(frame)?;
        }
        let joined = joined.within(range);

        info!(
            columns = joined.width(),
            rows = joined.len(),
            %range,
            "market data assembled"
        );
        Ok(joined)
    }
}

/// Fetches every configured series between `start` and `end` (inclusive)
/// over a blocking `reqwest` client.
pub fn fetch_data(settings: &FetchSettings, start: Date, end: Date) -> FetchResult<SeriesFrame> {
    let range = DateRange::new(start, end)?;
    let fetcher = MarketDataFetcher::new(ReqwestClient::new()?, settings.clone());
    fetcher.fetch(&range)
}
