//! Since-inception performance tables.
//!
//! For every evaluation date after the first, each entity's history is cut
//! at that date (inclusive) and solved from scratch, so row `t` is the
//! money-weighted return from inception observed through `t`. The first
//! row has no elapsed history and holds zeros.

use std::collections::HashMap;
use std::fmt;

use fundrate_core::{CoreError, Date, DateSeries, EntityHistory, SeriesFrame};
use fundrate_core::traits::HistorySource;
use serde::Serialize;
use tracing::{info, warn};

use crate::cashflow::EffectiveCashflow;
use crate::error::{PerformanceError, PerformanceResult};
use crate::irr::{IrrResult, IrrSolver};
use crate::policy::FailurePolicy;
use crate::roster::EntityRoster;

/// Rate and yield per (date, entity).
///
/// Failed cells under [`FailurePolicy::Capture`] hold `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTable {
    dates: Vec<Date>,
    entities: Vec<String>,
    irr: Vec<Vec<f64>>,
    yields: Vec<Vec<f64>>,
}

impl PerformanceTable {
    /// A zero-filled table.
    #[must_use]
    pub fn zeros(dates: Vec<Date>, entities: Vec<String>) -> Self {
        let column = vec![0.0; dates.len()];
        Self {
            irr: vec![column.clone(); entities.len()],
            yields: vec![column; entities.len()],
            dates,
            entities,
        }
    }

    /// Label of an entity's rate column.
    #[must_use]
    pub fn irr_label(entity: &str) -> String {
        format!("{entity} IRR")
    }

    /// Label of an entity's yield column.
    #[must_use]
    pub fn yield_label(entity: &str) -> String {
        format!("{entity} Yield")
    }

    /// Evaluation dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Entities in column order.
    #[must_use]
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rate column of `entity`.
    #[must_use]
    pub fn irr(&self, entity: &str) -> Option<&[f64]> {
        self.position(entity).map(|i| self.irr[i].as_slice())
    }

    /// Yield column of `entity`.
    #[must_use]
    pub fn effective_yield(&self, entity: &str) -> Option<&[f64]> {
        self.position(entity).map(|i| self.yields[i].as_slice())
    }

    /// Rate and yield of `entity` on the last date.
    #[must_use]
    pub fn latest(&self, entity: &str) -> Option<(f64, f64)> {
        let i = self.position(entity)?;
        Some((*self.irr[i].last()?, *self.yields[i].last()?))
    }

    /// The table as a frame: every rate column, then every yield column.
    /// `NaN` cells become missing values.
    pub fn to_frame(&self) -> PerformanceResult<SeriesFrame> {
        let mut frame = SeriesFrame::new(self.dates.clone())?;
        let as_cells = |values: &[f64]| -> Vec<Option<f64>> {
            values
                .iter()
                .map(|v| if v.is_nan() { None } else { Some(*v) })
                .collect()
        };
        for (entity, values) in self.entities.iter().zip(&self.irr) {
            frame.push_column(Self::irr_label(entity), as_cells(values))?;
        }
        for (entity, values) in self.entities.iter().zip(&self.yields) {
            frame.push_column(Self::yield_label(entity), as_cells(values))?;
        }
        Ok(frame)
    }

    fn position(&self, entity: &str) -> Option<usize> {
        self.entities.iter().position(|e| e == entity)
    }

    fn set(&mut self, row: usize, column: usize, irr: f64, effective_yield: f64) {
        self.irr[column][row] = irr;
        self.yields[column][row] = effective_yield;
    }
}

/// A cell the builder could not solve.
#[derive(Debug, Clone)]
pub struct CellFailure {
    /// Entity of the cell.
    pub entity: String,
    /// Date of the cell.
    pub date: Date,
    /// Why it failed.
    pub error: PerformanceError,
}

impl fmt::Display for CellFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: {}", self.entity, self.date, self.error)
    }
}

/// A built table and the cells that failed while building it.
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    /// The table.
    pub table: PerformanceTable,
    /// Captured failures, empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<CellFailure>,
}

impl PerformanceReport {
    /// Returns true if every cell was solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives the IRR solver across dates and entities.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTableBuilder {
    solver: IrrSolver,
    policy: FailurePolicy,
}

impl PerformanceTableBuilder {
    /// Creates a fail-fast builder with the default solver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver.
    #[must_use]
    pub fn with_solver(mut self, solver: IrrSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Builds the table of `entities` over `dates`.
    ///
    /// # Errors
    ///
    /// `UnknownEntity` if an entity has no history; under fail-fast, the
    /// first cell failure tagged with its entity and date.
    pub fn build(
        &self,
        histories: &HashMap<String, EntityHistory>,
        entities: &[String],
        dates: &[Date],
    ) -> PerformanceResult<PerformanceReport> {
        let columns = entities
            .iter()
            .map(|name| {
                histories
                    .get(name)
                    .ok_or_else(|| PerformanceError::unknown_entity(name))
            })
            .collect::<PerformanceResult<Vec<_>>>()?;

        info!(
            entities = entities.len(),
            dates = dates.len(),
            policy = %self.policy,
            "building performance table"
        );

        let mut table = PerformanceTable::zeros(dates.to_vec(), entities.to_vec());
        let mut failures = Vec::new();

        for (row, &date) in dates.iter().enumerate().skip(1) {
            for (column, history) in columns.iter().enumerate() {
                match self.solve_cell(history, date) {
                    Ok(result) => table.set(row, column, result.rate, result.effective_yield),
                    Err(error) if self.policy.captures() => {
                        warn!(entity = history.name(), %date, %error, "performance cell failed");
                        table.set(row, column, f64::NAN, f64::NAN);
                        failures.push(CellFailure {
                            entity: history.name().to_string(),
                            date,
                            error,
                        });
                    }
                    Err(error) => return Err(error.at(history.name(), date)),
                }
            }
        }

        info!(failures = failures.len(), "performance table built");
        Ok(PerformanceReport { table, failures })
    }

    /// Loads `entities` from `source` and builds their table over the
    /// source's dates.
    pub fn build_from_source<S>(
        &self,
        source: &S,
        entities: &[String],
    ) -> PerformanceResult<PerformanceReport>
    where
        S: HistorySource + ?Sized,
    {
        let dates = source.dates()?;
        let histories = entities
            .iter()
            .map(|name| match source.load_history(name) {
                Ok(history) => Ok((name.clone(), history)),
                Err(CoreError::UnknownColumn { .. }) => {
                    Err(PerformanceError::unknown_entity(name))
                }
                Err(e) => Err(e.into()),
            })
            .collect::<PerformanceResult<HashMap<_, _>>>()?;
        self.build(&histories, entities, &dates)
    }

    /// Solves one entity observed through `date`.
    pub fn solve_cell(&self, history: &EntityHistory, date: Date) -> PerformanceResult<IrrResult> {
        let window = history
            .through(date)
            .ok_or(PerformanceError::InsufficientCashflows { non_zero: 0 })?;
        self.solver.solve(&EffectiveCashflow::from_history(&window))
    }
}

/// Builds the table of the roster's funds.
pub fn get_fund_performance(
    histories: &HashMap<String, EntityHistory>,
    dates: &[Date],
    roster: &EntityRoster,
    builder: &PerformanceTableBuilder,
) -> PerformanceResult<PerformanceReport> {
    builder.build(histories, &roster.funds, dates)
}

/// Builds the table of the roster's benchmarks from their valuation
/// histories; benchmarks carry no transfers.
pub fn get_benchmark_performance(
    valuations: &HashMap<String, DateSeries>,
    dates: &[Date],
    roster: &EntityRoster,
    builder: &PerformanceTableBuilder,
) -> PerformanceResult<PerformanceReport> {
    let histories = roster
        .benchmarks
        .iter()
        .map(|name| {
            let valuation = valuations
                .get(name)
                .ok_or_else(|| PerformanceError::unknown_entity(name))?;
            let history = EntityHistory::valuation_only(name.clone(), valuation.clone())?;
            Ok((name.clone(), history))
        })
        .collect::<PerformanceResult<HashMap<_, _>>>()?;
    builder.build(&histories, &roster.benchmarks, dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irr::solve_irr;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn dates() -> Vec<Date> {
        vec![d(2023, 1, 1), d(2023, 7, 1), d(2024, 1, 1)]
    }

    fn history(name: &str, transfers: &[f64], values: &[f64]) -> EntityHistory {
        EntityHistory::new(
            name,
            DateSeries::new(dates(), transfers.to_vec()).unwrap(),
            DateSeries::new(dates(), values.to_vec()).unwrap(),
        )
        .unwrap()
    }

    fn ledger() -> HashMap<String, EntityHistory> {
        [
            history("Healthy", &[1000.0, 500.0, 0.0], &[1000.0, 1540.0, 1650.0]),
            history("Broken", &[0.0, 2000.0, 100.0], &[1000.0, 500.0, 0.0]),
        ]
        .into_iter()
        .map(|h| (h.name().to_string(), h))
        .collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_rows_match_direct_solves() {
        let histories = ledger();
        let report = PerformanceTableBuilder::new()
            .build(&histories, &names(&["Healthy"]), &dates())
            .unwrap();
        let table = &report.table;

        assert!(report.is_complete());
        assert_eq!(table.irr("Healthy").unwrap()[0], 0.0);
        assert_eq!(table.effective_yield("Healthy").unwrap()[0], 0.0);

        // Row 1 sees only the first two dates: closed form
        let row1 = solve_irr(&EffectiveCashflow::new(vec![0, 181], vec![-1000.0, 1040.0]).unwrap())
            .unwrap();
        assert_relative_eq!(table.irr("Healthy").unwrap()[1], row1.rate, epsilon = 1e-12);
        assert_relative_eq!(
            table.effective_yield("Healthy").unwrap()[1],
            0.04,
            epsilon = 1e-12
        );

        // Row 2 carries the interim transfer: numerical
        let flows = EffectiveCashflow::new(vec![0, 181, 365], vec![-1000.0, -500.0, 1650.0]).unwrap();
        let row2 = solve_irr(&flows).unwrap();
        assert_relative_eq!(table.irr("Healthy").unwrap()[2], row2.rate, epsilon = 1e-12);
        assert_eq!(table.latest("Healthy"), Some((row2.rate, row2.effective_yield)));
    }

    #[test]
    fn test_frame_labels_and_order() {
        let histories = ledger();
        let report = PerformanceTableBuilder::new()
            .with_policy(FailurePolicy::Capture)
            .build(&histories, &names(&["Healthy", "Broken"]), &dates())
            .unwrap();

        let frame = report.table.to_frame().unwrap();
        let labels: Vec<&str> = frame.column_names().collect();

        assert_eq!(
            labels,
            vec!["Healthy IRR", "Broken IRR", "Healthy Yield", "Broken Yield"]
        );
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.get(0, "Broken IRR"), Some(0.0));
        // NaN cells are written as missing
        assert_eq!(frame.get(1, "Broken IRR"), None);
    }

    #[test]
    fn test_fail_fast_tags_first_failure() {
        let histories = ledger();
        let err = PerformanceTableBuilder::new()
            .build(&histories, &names(&["Healthy", "Broken"]), &dates())
            .unwrap_err();

        match &err {
            PerformanceError::Cell { entity, date, .. } => {
                assert_eq!(entity, "Broken");
                assert_eq!(*date, d(2023, 7, 1));
            }
            other => panic!("expected a cell error, got {other:?}"),
        }
        assert!(matches!(
            err.root_cause(),
            PerformanceError::DomainError { .. }
        ));
    }

    #[test]
    fn test_capture_continues() {
        let histories = ledger();
        let report = PerformanceTableBuilder::new()
            .with_policy(FailurePolicy::Capture)
            .build(&histories, &names(&["Broken", "Healthy"]), &dates())
            .unwrap();

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].entity, "Broken");
        assert_eq!(report.failures[0].date, d(2023, 7, 1));
        assert!(matches!(
            report.failures[1].error,
            PerformanceError::NoBracket { .. }
        ));
        assert!(report.failures[0].to_string().starts_with("Broken on 2023-07-01"));

        let broken = report.table.irr("Broken").unwrap();
        assert!(broken[1].is_nan() && broken[2].is_nan());
        assert!(report.table.irr("Healthy").unwrap()[2].is_finite());
    }

    #[test]
    fn test_unknown_entity_under_either_policy() {
        let histories = ledger();
        for policy in [FailurePolicy::FailFast, FailurePolicy::Capture] {
            let err = PerformanceTableBuilder::new()
                .with_policy(policy)
                .build(&histories, &names(&["Missing"]), &dates())
                .unwrap_err();
            assert!(matches!(err, PerformanceError::UnknownEntity { .. }));
        }
    }

    #[test]
    fn test_benchmark_performance() {
        let roster = EntityRoster::new(Vec::<String>::new(), ["CLFCLP"]);
        let valuations: HashMap<String, DateSeries> = [(
            "CLFCLP".to_string(),
            DateSeries::new(dates(), vec![35_000.0, 36_000.0, 36_750.0]).unwrap(),
        )]
        .into_iter()
        .collect();

        let report =
            get_benchmark_performance(&valuations, &dates(), &roster, &PerformanceTableBuilder::new())
                .unwrap();

        let yields = report.table.effective_yield("CLFCLP").unwrap();
        assert_eq!(yields[0], 0.0);
        assert_relative_eq!(yields[1], 36_000.0 / 35_000.0 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(yields[2], 36_750.0 / 35_000.0 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            report.table.irr("CLFCLP").unwrap()[2],
            (36_750.0_f64 / 35_000.0).ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_fund_performance_uses_roster_order() {
        let roster = EntityRoster::new(["Healthy"], Vec::<String>::new());

        let report =
            get_fund_performance(&ledger(), &dates(), &roster, &PerformanceTableBuilder::new())
                .unwrap();

        assert_eq!(report.table.entities(), &["Healthy".to_string()]);
    }

    #[test]
    fn test_date_before_history_is_insufficient() {
        let histories = ledger();
        let builder = PerformanceTableBuilder::new();
        let err = builder
            .solve_cell(&histories["Healthy"], d(2022, 12, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PerformanceError::InsufficientCashflows { non_zero: 0 }
        ));
    }
}
