//! Fund ledger read from a transfers file and a valuations file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fundrate_core::{
    CoreError, CoreResult, Date, DateRange, EntityHistory, HistorySource, SeriesFrame,
};

use crate::error::FileResult;
use crate::frame_csv::read_frame;

/// Fund histories backed by `transfers.csv` and `valuations.csv`.
///
/// Both files are loaded eagerly on [`open`](Self::open). Their date indices
/// are outer-joined and restricted to the window; missing transfers count as
/// zero and missing valuations take the last known value (or the next one
/// before the first observation).
#[derive(Debug, Clone)]
pub struct CsvLedgerSource {
    transfers_path: PathBuf,
    valuations_path: PathBuf,
    transfers: SeriesFrame,
    valuations: SeriesFrame,
}

impl CsvLedgerSource {
    /// Loads and aligns both ledger files.
    pub fn open(
        transfers: impl AsRef<Path>,
        valuations: impl AsRef<Path>,
        window: &DateRange,
    ) -> FileResult<Self> {
        let transfers_path = transfers.as_ref().to_path_buf();
        let valuations_path = valuations.as_ref().to_path_buf();

        let raw_transfers = read_frame(&transfers_path)?;
        let raw_valuations = read_frame(&valuations_path)?;

        let mut index: Vec<Date> = raw_transfers
            .index()
            .iter()
            .chain(raw_valuations.index())
            .copied()
            .collect();
        index.sort_unstable();
        index.dedup();

        let transfers = raw_transfers
            .reindex(&index)
            .fill_missing(0.0)
            .within(window);
        let valuations = raw_valuations
            .reindex(&index)
            .forward_fill()
            .backward_fill()
            .within(window);

        tracing::info!(
            transfers = %transfers_path.display(),
            valuations = %valuations_path.display(),
            rows = valuations.len(),
            funds = valuations.width(),
            %window,
            "loaded ledger"
        );

        Ok(Self {
            transfers_path,
            valuations_path,
            transfers,
            valuations,
        })
    }

    /// Path of the transfers file.
    #[must_use]
    pub fn transfers_path(&self) -> &Path {
        &self.transfers_path
    }

    /// Path of the valuations file.
    #[must_use]
    pub fn valuations_path(&self) -> &Path {
        &self.valuations_path
    }

    /// Funds with a valuation column.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.valuations.column_names()
    }

    /// Histories of the named funds that the ledger carries.
    ///
    /// Names absent from the valuations file are skipped so the caller can
    /// report them.
    pub fn histories(&self, names: &[String]) -> CoreResult<HashMap<String, EntityHistory>> {
        names
            .iter()
            .filter(|name| self.valuations.column(name).is_some())
            .map(|name| self.load_history(name).map(|history| (name.clone(), history)))
            .collect()
    }
}

impl HistorySource for CsvLedgerSource {
    fn dates(&self) -> CoreResult<Vec<Date>> {
        if self.valuations.is_empty() {
            return Err(CoreError::empty_series(format!(
                "ledger {}",
                self.valuations_path.display()
            )));
        }
        Ok(self.valuations.index().to_vec())
    }

    fn load_history(&self, entity: &str) -> CoreResult<EntityHistory> {
        let valuation = self.valuations.series(entity)?;
        // A fund without a transfers column never moved money.
        let cashflow = match self.transfers.column(entity) {
            Some(_) => self.transfers.series(entity)?,
            None => valuation.zeros_like(),
        };
        EntityHistory::new(entity, cashflow, valuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::TempDir;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn window(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    fn write_ledger(dir: &TempDir) -> (PathBuf, PathBuf) {
        let transfers = dir.path().join("transfers.csv");
        let valuations = dir.path().join("valuations.csv");
        fs::write(
            &transfers,
            "Date,Fondo A,Fondo B\n\
             2023-01-01,1000,200\n\
             2023-03-15,500,\n",
        )
        .unwrap();
        fs::write(
            &valuations,
            "Date,Fondo A,Fondo B,Fondo C\n\
             2023-01-01,1000,,50\n\
             2023-02-01,1010,205,\n\
             2023-04-01,1530,210,52\n",
        )
        .unwrap();
        (transfers, valuations)
    }

    #[test]
    fn test_outer_join_and_fill() {
        let dir = TempDir::new().unwrap();
        let (t, v) = write_ledger(&dir);
        let ledger = CsvLedgerSource::open(&t, &v, &window("2020-01-01", "2030-01-01")).unwrap();

        let dates = ledger.dates().unwrap();
        assert_eq!(
            dates,
            vec![d("2023-01-01"), d("2023-02-01"), d("2023-03-15"), d("2023-04-01")]
        );

        let a = ledger.load_history("Fondo A").unwrap();
        assert_eq!(a.cashflow().values(), &[1000.0, 0.0, 500.0, 0.0]);
        assert_eq!(a.valuation().values(), &[1000.0, 1010.0, 1010.0, 1530.0]);

        // Leading gap takes the first observation
        let b = ledger.load_history("Fondo B").unwrap();
        assert_eq!(b.valuation().values(), &[205.0, 205.0, 205.0, 210.0]);
        assert_eq!(b.cashflow().values(), &[200.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_transfer_column_is_zero() {
        let dir = TempDir::new().unwrap();
        let (t, v) = write_ledger(&dir);
        let ledger = CsvLedgerSource::open(&t, &v, &window("2020-01-01", "2030-01-01")).unwrap();

        let c = ledger.load_history("Fondo C").unwrap();
        assert_relative_eq!(c.cashflow().sum(), 0.0);
        assert_eq!(c.valuation().values(), &[50.0, 50.0, 50.0, 52.0]);
    }

    #[test]
    fn test_window_restricts_rows() {
        let dir = TempDir::new().unwrap();
        let (t, v) = write_ledger(&dir);
        let ledger = CsvLedgerSource::open(&t, &v, &window("2023-02-01", "2023-03-31")).unwrap();

        assert_eq!(ledger.dates().unwrap(), vec![d("2023-02-01"), d("2023-03-15")]);
        let a = ledger.load_history("Fondo A").unwrap();
        assert_eq!(a.cashflow().values(), &[0.0, 500.0]);
    }

    #[test]
    fn test_unknown_fund_and_histories() {
        let dir = TempDir::new().unwrap();
        let (t, v) = write_ledger(&dir);
        let ledger = CsvLedgerSource::open(&t, &v, &window("2020-01-01", "2030-01-01")).unwrap();

        assert!(matches!(
            ledger.load_history("Fondo Z"),
            Err(CoreError::UnknownColumn { .. })
        ));

        let names = vec!["Fondo A".to_string(), "Fondo Z".to_string()];
        let histories = ledger.histories(&names).unwrap();
        assert_eq!(histories.len(), 1);
        assert!(histories.contains_key("Fondo A"));
        assert_eq!(
            ledger.entities().collect::<Vec<_>>(),
            ["Fondo A", "Fondo B", "Fondo C"]
        );
    }

    #[test]
    fn test_empty_window() {
        let dir = TempDir::new().unwrap();
        let (t, v) = write_ledger(&dir);
        let ledger = CsvLedgerSource::open(&t, &v, &window("2010-01-01", "2010-12-31")).unwrap();
        assert!(ledger.dates().is_err());
    }
}
