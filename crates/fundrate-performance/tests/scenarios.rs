//! End-to-end scenarios for fund and benchmark tables.

use std::collections::HashMap;

use approx::assert_relative_eq;
use fundrate_core::traits::HistorySource;
use fundrate_core::{CoreError, CoreResult, Date, DateSeries, EntityHistory};
use fundrate_performance::prelude::*;

struct InMemory {
    dates: Vec<Date>,
    histories: HashMap<String, EntityHistory>,
}

impl HistorySource for InMemory {
    fn dates(&self) -> CoreResult<Vec<Date>> {
        Ok(self.dates.clone())
    }

    fn load_history(&self, entity: &str) -> CoreResult<EntityHistory> {
        self.histories
            .get(entity)
            .cloned()
            .ok_or_else(|| CoreError::unknown_column(entity))
    }
}

fn month_ends() -> Vec<Date> {
    (1..=12)
        .map(|m| Date::from_ymd(2024, m, 1).unwrap())
        .collect()
}

fn fund(name: &str, monthly_transfer: f64, monthly_growth: f64) -> EntityHistory {
    let dates = month_ends();
    let mut value = 10_000.0;
    let mut values = Vec::new();
    let mut transfers = Vec::new();
    for i in 0..dates.len() {
        if i == 0 {
            transfers.push(value);
        } else {
            value = value * monthly_growth + monthly_transfer;
            transfers.push(monthly_transfer);
        }
        values.push(value);
    }
    EntityHistory::new(
        name,
        DateSeries::new(dates.clone(), transfers).unwrap(),
        DateSeries::new(dates, values).unwrap(),
    )
    .unwrap()
}

#[test]
fn steady_saver_table_from_source() {
    let saver = fund("Fondo A", 250.0, 1.005);
    let source = InMemory {
        dates: month_ends(),
        histories: [("Fondo A".to_string(), saver)].into_iter().collect(),
    };

    let report = PerformanceTableBuilder::new()
        .build_from_source(&source, &["Fondo A".to_string()])
        .unwrap();

    let irr = report.table.irr("Fondo A").unwrap();
    assert_eq!(irr.len(), 12);
    assert_eq!(irr[0], 0.0);
    // 0.5% a month, roughly 6% a year continuously compounded
    for rate in &irr[2..] {
        assert!((0.055..0.065).contains(rate), "rate {rate}");
    }
}

#[test]
fn missing_column_is_unknown_entity() {
    let source = InMemory {
        dates: month_ends(),
        histories: HashMap::new(),
    };

    let err = PerformanceTableBuilder::new()
        .build_from_source(&source, &["Fondo Z".to_string()])
        .unwrap_err();

    assert!(matches!(err, PerformanceError::UnknownEntity { ref name } if name == "Fondo Z"));
}

#[test]
fn flat_benchmark_has_zero_return() {
    let dates = month_ends();
    let roster = EntityRoster::new(Vec::<String>::new(), ["TPM"]);
    let valuations: HashMap<String, DateSeries> = [(
        "TPM".to_string(),
        DateSeries::new(dates.clone(), vec![5.75; dates.len()]).unwrap(),
    )]
    .into_iter()
    .collect();

    let report =
        get_benchmark_performance(&valuations, &dates, &roster, &PerformanceTableBuilder::new())
            .unwrap();

    for (rate, y) in report
        .table
        .irr("TPM")
        .unwrap()
        .iter()
        .zip(report.table.effective_yield("TPM").unwrap())
    {
        assert_relative_eq!(*rate, 0.0, epsilon = 1e-15);
        assert_relative_eq!(*y, 0.0, epsilon = 1e-15);
    }
}
