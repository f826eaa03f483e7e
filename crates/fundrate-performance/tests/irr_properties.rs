//! Property tests for the IRR solver and the effective cashflow transform.

use fundrate_core::{Date, DateSeries, EntityHistory};
use fundrate_performance::irr::{effective_yield, IrrSolver};
use fundrate_performance::prelude::*;
use proptest::prelude::*;

fn start() -> Date {
    Date::from_ymd(2020, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn closed_form_agrees_with_numerical(
        invested in 100.0f64..1e6,
        growth in 0.7f64..1.4,
        days in 180i64..3000,
        interim in 1i64..29,
    ) {
        let flows = EffectiveCashflow::new(
            vec![0, interim, days],
            vec![-invested, 0.0, invested * growth],
        ).unwrap();

        let closed = simple_irr_solve(&flows).unwrap();
        let numerical = IrrSolver::new().solve_numerical(&flows).unwrap();

        prop_assert!((closed.rate - numerical.rate).abs() <= 1e-9 * closed.rate.abs().max(1.0));
    }

    #[test]
    fn numerical_solutions_zero_the_npv(
        first in 100.0f64..1e5,
        share in 0.0f64..1.0,
        growth in 0.7f64..1.5,
        mid in 1i64..180,
    ) {
        let second = first * share;
        let end = (first + second) * growth;
        let flows = EffectiveCashflow::new(vec![0, mid, 365], vec![-first, -second - 1.0, end]).unwrap();

        let result = solve_irr(&flows).unwrap();

        prop_assert!(flows.npv(result.rate).abs() <= 1000.0);
        prop_assert!((result.effective_yield - effective_yield(result.rate, 365)).abs() < 1e-9);
    }

    #[test]
    fn effective_cashflow_conserves_net_value(
        values in prop::collection::vec(1.0f64..1e4, 1..20),
        transfers in prop::collection::vec(-500.0f64..500.0, 20),
    ) {
        let n = values.len();
        let dates: Vec<Date> = (0..n).map(|i| start().add_days(i as i64 * 7)).collect();
        let cashflow = DateSeries::new(dates.clone(), transfers[..n].to_vec()).unwrap();
        let valuation = DateSeries::new(dates, values.clone()).unwrap();
        let history = EntityHistory::new("P", cashflow, valuation).unwrap();

        let flows = EffectiveCashflow::from_history(&history);

        let later_transfers: f64 = transfers[1..n].iter().sum();
        let expected = values[n - 1] - values[0] - later_transfers;
        prop_assert!((flows.total() - expected).abs() < 1e-6);
        prop_assert_eq!(flows.days()[0], 0);
        prop_assert!(flows.days().windows(2).all(|w| w[0] <= w[1]));
    }
}
