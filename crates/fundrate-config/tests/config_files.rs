//! Configuration files on disk.

use std::fs;

use fundrate_config::{AppConfig, ConfigError, CONFIG_FILE_NAME};
use fundrate_performance::prelude::FailurePolicy;
use tempfile::TempDir;

#[test]
fn saved_defaults_load_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf").join(CONFIG_FILE_NAME);

    let mut config = AppConfig::default();
    config.performance.policy = FailurePolicy::Capture;
    config.fetch.yahoo.enabled = true;
    config.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[ledger]"));
    assert!(text.contains("policy = \"capture\""));

    let loaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_or_default(dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn malformed_file_names_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[window\nstart = 2020").unwrap();

    let err = AppConfig::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}
