//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Values** (accounts, stores): a higher-precedence file overrides a lower one
//! - **Booleans**: OR semantics, so any file setting `true` wins
//!
//! Relative store paths are resolved against the directory of the file that
//! sets them.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .anisync.local
    /// 3. .anisync
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        for path in files.in_merge_order() {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut Config, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(dir) = path.parent() {
            for store in [&mut config.reference_store, &mut config.target_store] {
                if let Some(store) = store
                    && store.is_relative()
                    && !store.as_os_str().is_empty()
                {
                    *store = dir.join(&*store);
                }
            }
        }

        if config.reference_account.is_some() {
            base.reference_account = config.reference_account;
        }
        if config.target_account.is_some() {
            base.target_account = config.target_account;
        }
        if config.reference_store.is_some() {
            base.reference_store = config.reference_store;
        }
        if config.target_store.is_some() {
            base.target_store = config.target_store;
        }

        base.assume_yes |= config.assume_yes;
        base.dry_run |= config.dry_run;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_merge_empty_config() {
        let config = ConfigMerger::merge(&ConfigFiles::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_precedence() {
        let tmp = TempDir::new().unwrap();

        let global = tmp.path().join("global.toml");
        fs::write(
            &global,
            "reference_account = \"old\"\ntarget_account = \"watcher\"\n",
        )
        .unwrap();

        let project = tmp.path().join("project.toml");
        fs::write(&project, "reference_account = \"fan\"\n").unwrap();

        let files = ConfigFiles {
            project: Some(project),
            global: Some(global),
            ..ConfigFiles::default()
        };
        let config = ConfigMerger::merge(&files).unwrap();

        assert_eq!(config.reference_account.as_deref(), Some("fan"));
        assert_eq!(config.target_account.as_deref(), Some("watcher"));
    }

    #[test]
    fn test_merge_boolean_or() {
        let tmp = TempDir::new().unwrap();

        let global = tmp.path().join("global.toml");
        fs::write(&global, "dry_run = true\n").unwrap();

        let local = tmp.path().join("local.toml");
        fs::write(&local, "dry_run = false\nassume_yes = true\n").unwrap();

        let files = ConfigFiles {
            local: Some(local),
            global: Some(global),
            ..ConfigFiles::default()
        };
        let config = ConfigMerger::merge(&files).unwrap();

        assert!(config.dry_run);
        assert!(config.assume_yes);
    }

    #[test]
    fn test_relative_store_is_resolved_against_file() {
        let tmp = TempDir::new().unwrap();
        let cli = tmp.path().join("anisync.toml");
        fs::write(
            &cli,
            "reference_store = \"lists/reference\"\ntarget_store = \"/abs/target\"\n",
        )
        .unwrap();

        let files = ConfigFiles {
            cli: Some(cli),
            ..ConfigFiles::default()
        };
        let config = ConfigMerger::merge(&files).unwrap();

        assert_eq!(
            config.reference_store,
            Some(tmp.path().join("lists/reference"))
        );
        assert_eq!(config.target_store, Some(PathBuf::from("/abs/target")));
    }

    #[test]
    fn test_merge_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "reference_account = [").unwrap();

        let files = ConfigFiles {
            cli: Some(bad),
            ..ConfigFiles::default()
        };
        let error = ConfigMerger::merge(&files).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }
}
