//! Boundary traits for the performance engine.
//!
//! - [`HistorySource`]: where the engine reads per-entity history from
//! - [`TableSink`]: where computed tables are written to
//!
//! The engine never touches files, spreadsheets or the network itself; any
//! storage that can produce aligned, date-indexed series can drive it.

use crate::error::CoreResult;
use crate::types::{Date, EntityHistory, SeriesFrame};

/// A provider of aligned cashflow and valuation history.
///
/// Implementations are expected to have already aligned both series on a
/// common date index and filled gaps, so every `EntityHistory` they return
/// is ready for the engine.
pub trait HistorySource {
    /// The evaluation dates shared by every entity of this source.
    fn dates(&self) -> CoreResult<Vec<Date>>;

    /// Loads the history of one entity by name.
    fn load_history(&self, entity: &str) -> CoreResult<EntityHistory>;

    /// Loads several entities, failing on the first missing one.
    fn load_all(&self, entities: &[String]) -> CoreResult<Vec<EntityHistory>> {
        entities.iter().map(|e| self.load_history(e)).collect()
    }
}

/// A destination for date-indexed tables.
pub trait TableSink {
    /// Writes `table`, replacing whatever the destination held before.
    fn write_table(&self, table: &SeriesFrame) -> CoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::DateSeries;
    use std::cell::RefCell;

    struct OneEntity;

    impl HistorySource for OneEntity {
        fn dates(&self) -> CoreResult<Vec<Date>> {
            Ok(vec![Date::from_ymd(2024, 1, 1)?])
        }

        fn load_history(&self, entity: &str) -> CoreResult<EntityHistory> {
            if entity != "Fund" {
                return Err(CoreError::unknown_column(entity));
            }
            let tv = DateSeries::new(self.dates()?, vec![100.0])?;
            EntityHistory::valuation_only(entity, tv)
        }
    }

    struct Recorder(RefCell<Vec<usize>>);

    impl TableSink for Recorder {
        fn write_table(&self, table: &SeriesFrame) -> CoreResult<()> {
            self.0.borrow_mut().push(table.len());
            Ok(())
        }
    }

    #[test]
    fn test_load_all_stops_on_unknown() {
        let source = OneEntity;
        assert_eq!(source.load_all(&["Fund".into()]).unwrap().len(), 1);
        assert!(source.load_all(&["Fund".into(), "Other".into()]).is_err());
    }

    #[test]
    fn test_sink_receives_table() {
        let sink = Recorder(RefCell::new(Vec::new()));
        let frame = SeriesFrame::new(vec![Date::from_ymd(2024, 1, 1).unwrap()]).unwrap();
        sink.write_table(&frame).unwrap();
        assert_eq!(*sink.0.borrow(), vec![1]);
    }
}
