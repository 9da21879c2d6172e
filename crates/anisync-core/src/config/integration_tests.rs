//! Integration tests for configuration module

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::ConfigManager;

#[test]
fn test_full_config_workflow() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");

    fs::write(
        &config_file,
        r#"
reference_account = "fan"
target_account = "watcher"
reference_store = "/srv/reference"
target_store = "/srv/target"
assume_yes = false
dry_run = true
"#,
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_file)).unwrap();

    assert_eq!(config.reference_account.as_deref(), Some("fan"));
    assert_eq!(config.target_account.as_deref(), Some("watcher"));
    assert_eq!(config.reference_store, Some(PathBuf::from("/srv/reference")));
    assert!(config.dry_run);
}

#[test]
fn test_invalid_config_validation() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "reference_account = \"\"\n").unwrap();

    let result = ConfigManager::load(Some(&config_file));

    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("reference_account cannot be empty")
    );
}

#[test]
fn test_blank_store_in_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "reference_store = \"\"\n").unwrap();

    let result = ConfigManager::load(Some(&config_file));

    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("reference_store cannot be empty")
    );
}

#[test]
fn test_password_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "reference_password = \"hunter2\"\n").unwrap();

    assert!(ConfigManager::load(Some(&config_file)).is_err());
}

#[test]
fn test_missing_cli_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.toml");

    let error = ConfigManager::load(Some(&missing)).unwrap_err();
    assert!(error.to_string().contains("Config file not found"));
}
