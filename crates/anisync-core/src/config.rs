//! Configuration file parsing and merging
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation and error reporting
//!
//! Credentials are never read from configuration files.

mod discovery;
mod merge;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles};
pub use merge::ConfigMerger;
pub use types::Config;
pub use validation::ConfigValidator;

use crate::error::Result;

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given config file does not exist,
    /// or if any config file is invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        if let Some(path) = cli_config_path
            && !path.is_file()
        {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config_files = ConfigDiscovery::discover(cli_config_path);
        let merged = ConfigMerger::merge(&config_files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}
