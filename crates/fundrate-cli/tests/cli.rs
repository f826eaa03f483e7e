//! End-to-end runs of the `fundrate` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `fundrate` invocation isolated inside `dir`.
fn fundrate(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fundrate").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("FUNDRATE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_workspace(dir: &Path, with_broken_fund: bool) {
    let data = dir.join("data");
    fs::create_dir_all(&data).unwrap();

    let (funds, transfers, valuations) = if with_broken_fund {
        (
            r#"["Fondo A", "Fondo B"]"#,
            "Date,Fondo A,Fondo B\n2023-01-01,1000,0\n2023-07-01,,2000\n2024-01-01,,100\n",
            "Date,Fondo A,Fondo B\n2023-01-01,1000,1000\n2023-07-01,1040,500\n2024-01-01,1100,0\n",
        )
    } else {
        (
            r#"["Fondo A"]"#,
            "Date,Fondo A\n2023-01-01,1000\n",
            "Date,Fondo A\n2023-01-01,1000\n2023-07-01,1040\n2024-01-01,1100\n",
        )
    };
    fs::write(data.join("transfers.csv"), transfers).unwrap();
    fs::write(data.join("valuations.csv"), valuations).unwrap();
    fs::write(
        data.join("market_data.csv"),
        "Date,CLFCLP\n2023-01-01,35000\n2024-01-01,36750\n",
    )
    .unwrap();
    fs::write(
        dir.join("fundrate.toml"),
        format!(
            "[window]\nstart = \"2023-01-01\"\nend = \"2024-01-01\"\n\n\
             [roster]\nfunds = {funds}\nbenchmarks = [\"CLFCLP\"]\n"
        ),
    )
    .unwrap();
}

#[test]
fn irr_closed_form_as_json() {
    let dir = TempDir::new().unwrap();
    fundrate(dir.path())
        .args(["--format", "json", "irr"])
        .args(["--flow", "2023-01-01:-1000", "--flow", "2024-01-01:1100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"closed_form\""))
        .stdout(predicate::str::contains("0.0953101798"));
}

#[test]
fn irr_minimal_prints_rate_only() {
    let dir = TempDir::new().unwrap();
    fundrate(dir.path())
        .args(["--format", "minimal", "irr"])
        .args(["--flow", "2023-01-01:-1000"])
        .args(["--flow", "2023-06-30:-500"])
        .args(["--flow", "2024-01-01:1700"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.1"));
}

#[test]
fn irr_needs_two_flows() {
    let dir = TempDir::new().unwrap();
    fundrate(dir.path())
        .args(["irr", "--flow", "2023-01-01:-1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("two non-zero cashflows"));
}

#[test]
fn irr_rejects_malformed_flow() {
    let dir = TempDir::new().unwrap();
    fundrate(dir.path())
        .args(["irr", "--flow", "2023-01-01=-1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATE:AMOUNT"));
}

#[test]
fn performance_writes_both_tables() {
    let dir = TempDir::new().unwrap();
    write_workspace(dir.path(), false);

    fundrate(dir.path())
        .args(["--format", "json", "performance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entity\": \"Fondo A\""))
        .stdout(predicate::str::contains("\"entity\": \"CLFCLP\""));

    let funds = fs::read_to_string(dir.path().join("output/fund_performance.csv")).unwrap();
    assert!(funds.starts_with("Date,Fondo A IRR,Fondo A Yield\n2023-01-01,0,0\n"));
    assert_eq!(funds.lines().count(), 4);

    let benchmarks =
        fs::read_to_string(dir.path().join("output/benchmark_performance.csv")).unwrap();
    assert!(benchmarks.starts_with("Date,CLFCLP IRR,CLFCLP Yield\n"));
}

#[test]
fn performance_funds_only_skips_market_data() {
    let dir = TempDir::new().unwrap();
    write_workspace(dir.path(), false);
    fs::remove_file(dir.path().join("data/market_data.csv")).unwrap();

    fundrate(dir.path())
        .args(["--quiet", "performance", "--funds-only"])
        .assert()
        .success();

    assert!(dir.path().join("output/fund_performance.csv").exists());
    assert!(!dir.path().join("output/benchmark_performance.csv").exists());
}

#[test]
fn performance_fail_fast_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_workspace(dir.path(), true);

    fundrate(dir.path())
        .arg("performance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fondo B"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn performance_capture_leaves_blank_cells() {
    let dir = TempDir::new().unwrap();
    write_workspace(dir.path(), true);

    fundrate(dir.path())
        .args(["performance", "--capture-errors"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Fondo B on"));

    let funds = fs::read_to_string(dir.path().join("output/fund_performance.csv")).unwrap();
    let last = funds.lines().last().unwrap();
    let cells: Vec<&str> = last.split(',').collect();
    // Date, Fondo A IRR, Fondo B IRR, Fondo A Yield, Fondo B Yield
    assert_eq!(cells.len(), 5);
    assert!(!cells[1].is_empty());
    assert!(cells[2].is_empty());
    assert!(cells[4].is_empty());
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();

    fundrate(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default configuration written"));
    assert!(dir.path().join("fundrate.toml").exists());

    fundrate(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fundrate(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_reads_local_file() {
    let dir = TempDir::new().unwrap();
    write_workspace(dir.path(), false);

    fundrate(dir.path())
        .args(["--format", "csv", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roster.funds,Fondo A"))
        .stdout(predicate::str::contains("window.end,2024-01-01"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    fundrate(dir.path())
        .args(["--config", "missing.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}
