//! Benchmark valuations read from the market-data file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fundrate_core::{
    CoreError, CoreResult, Date, DateRange, DateSeries, EntityHistory, HistorySource, SeriesFrame,
};

use crate::error::FileResult;
use crate::frame_csv::read_frame;

/// Benchmark series backed by the CSV the fetcher writes.
///
/// Every column is one benchmark's valuation. Gaps are forward- then
/// backward-filled before the window is applied; benchmarks have no
/// cashflows.
#[derive(Debug, Clone)]
pub struct CsvMarketDataSource {
    path: PathBuf,
    frame: SeriesFrame,
}

impl CsvMarketDataSource {
    /// Loads the market-data file.
    pub fn open(path: impl AsRef<Path>, window: &DateRange) -> FileResult<Self> {
        let path = path.as_ref().to_path_buf();
        let frame = read_frame(&path)?
            .forward_fill()
            .backward_fill()
            .within(window);

        tracing::info!(
            path = %path.display(),
            rows = frame.len(),
            series = frame.width(),
            %window,
            "loaded market data"
        );
        Ok(Self { path, frame })
    }

    /// Path of the market-data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filled, windowed table.
    #[must_use]
    pub fn frame(&self) -> &SeriesFrame {
        &self.frame
    }

    /// Valuation series of the named benchmarks present in the file.
    pub fn valuations(&self, names: &[String]) -> CoreResult<HashMap<String, DateSeries>> {
        names
            .iter()
            .filter(|name| self.frame.column(name).is_some())
            .map(|name| self.frame.series(name).map(|series| (name.clone(), series)))
            .collect()
    }
}

impl HistorySource for CsvMarketDataSource {
    fn dates(&self) -> CoreResult<Vec<Date>> {
        if self.frame.is_empty() {
            return Err(CoreError::empty_series(format!(
                "market data {}",
                self.path.display()
            )));
        }
        Ok(self.frame.index().to_vec())
    }

    fn load_history(&self, entity: &str) -> CoreResult<EntityHistory> {
        EntityHistory::valuation_only(entity, self.frame.series(entity)?)
    }
}
