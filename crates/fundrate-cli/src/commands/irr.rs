//! IRR command implementation.
//!
//! Solves the continuously compounded rate of an explicit cashflow list.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use fundrate_core::{Date, DateSeries};
use fundrate_performance::prelude::{EffectiveCashflow, IrrMethod, IrrResult, IrrSolver};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_output, print_single, KeyValue};

/// Arguments for the irr command.
#[derive(Args, Debug)]
pub struct IrrArgs {
    /// Dated cashflow as DATE:AMOUNT, negative for money paid in. Repeat per
    /// flow; flows on the same date are added up.
    #[arg(long = "flow", value_name = "DATE:AMOUNT", required = true, allow_hyphen_values = true)]
    pub flows: Vec<String>,
}

/// Execute the irr command.
pub fn execute(args: IrrArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    let series = parse_flows(&args.flows)?;
    let flows = EffectiveCashflow::from_dated(&series)?;
    let result = IrrSolver::with_config(config.performance.solver).solve(&flows)?;

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            if ctx.format == OutputFormat::Table {
                print_header("Rate of Return");
            }
            print_output(&summary(&result, flows.last_day()), ctx.format)?;
        }
        OutputFormat::Json => print_single(&result, ctx.format)?,
        OutputFormat::Minimal => println!("{}", result.rate),
    }

    Ok(())
}

/// Parses `DATE:AMOUNT` pairs into a date-ordered series.
fn parse_flows(raw: &[String]) -> CliResult<DateSeries> {
    let mut by_date: BTreeMap<Date, f64> = BTreeMap::new();
    for flow in raw {
        let (date, amount) = flow
            .split_once(':')
            .ok_or_else(|| CliError::InvalidFlow(flow.clone()))?;
        let date = parse_date(date.trim())?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| CliError::InvalidFlow(flow.clone()))?;
        *by_date.entry(date).or_insert(0.0) += amount;
    }
    DateSeries::from_pairs(by_date).map_err(|e| CliError::InvalidFlow(e.to_string()))
}

fn summary(result: &IrrResult, days: i64) -> Vec<KeyValue> {
    let method = match result.method {
        IrrMethod::ClosedForm => "closed form".to_string(),
        IrrMethod::Numerical { bracket, iterations } => format!(
            "numerical, bracket [{}, {}], {} iterations",
            bracket.0, bracket.1, iterations
        ),
    };
    vec![
        KeyValue::from_percent("Rate (continuous, annual)", result.rate),
        KeyValue::from_percent("Effective yield", result.effective_yield),
        KeyValue::new("Horizon (days)", days.to_string()),
        KeyValue::new("Residual NPV", format!("{:.3e}", result.residual)),
        KeyValue::new("Method", method),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flows(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_flows_orders_and_merges() {
        let series = parse_flows(&flows(&[
            "2024-01-01:1100",
            "2023-01-01:-1000",
            "2024-01-01: -50",
        ]))
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[-1000.0, 1050.0]);
    }

    #[test]
    fn test_parse_flows_rejects_garbage() {
        assert!(matches!(
            parse_flows(&flows(&["2024-01-01"])),
            Err(CliError::InvalidFlow(_))
        ));
        assert!(matches!(
            parse_flows(&flows(&["2024-01-01:ten"])),
            Err(CliError::InvalidFlow(_))
        ));
        assert!(matches!(
            parse_flows(&flows(&["01/01/2024:10"])),
            Err(CliError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_summary_mentions_method() {
        let result = IrrResult {
            rate: 0.1,
            effective_yield: 0.105,
            residual: 0.0,
            method: IrrMethod::Numerical {
                bracket: (-1.0, 1.0),
                iterations: 7,
            },
        };
        let rows = summary(&result, 365);
        assert_eq!(rows[0].value, "10.0000%");
        assert!(rows[4].value.contains("7 iterations"));
    }
}
