//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Unknown keys are rejected, so a stray `password` entry fails loudly
/// instead of being silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Account whose list receives writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_account: Option<String>,

    /// Account whose list is the desired state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account: Option<String>,

    /// Directory of reference list files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_store: Option<PathBuf>,

    /// Directory of target list files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_store: Option<PathBuf>,

    /// Skip the confirmation prompt before syncing
    #[serde(default)]
    pub assume_yes: bool,

    /// Report what a sync would do without writing
    #[serde(default)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.reference_account.is_none());
        assert!(config.target_store.is_none());
        assert!(!config.assume_yes);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_config_parse() {
        let config: Config = toml::from_str(
            r#"
reference_account = "fan"
target_store = "/srv/target"
dry_run = true
"#,
        )
        .unwrap();

        assert_eq!(config.reference_account.as_deref(), Some("fan"));
        assert_eq!(config.target_store, Some(PathBuf::from("/srv/target")));
        assert!(config.dry_run);
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let result = toml::from_str::<Config>(r#"password = "hunter2""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serializes_set_values_only() {
        let config = Config {
            target_account: Some("watcher".to_string()),
            ..Config::default()
        };

        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("target_account = \"watcher\""));
        assert!(!text.contains("reference_account"));
    }
}
