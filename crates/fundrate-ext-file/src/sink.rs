//! CSV destination for performance and market-data tables.

use std::path::{Path, PathBuf};

use fundrate_core::{CoreResult, SeriesFrame, TableSink};

use crate::frame_csv::write_frame;

/// Writes tables to a single CSV file, replacing its content each time.
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    path: PathBuf,
}

impl CsvTableSink {
    /// Creates a sink for `path`. Nothing is written until
    /// [`write_table`](TableSink::write_table).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for CsvTableSink {
    fn write_table(&self, table: &SeriesFrame) -> CoreResult<()> {
        write_frame(&self.path, table)?;
        tracing::info!(path = %self.path.display(), rows = table.len(), "table written");
        Ok(())
    }
}
