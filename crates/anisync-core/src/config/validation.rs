//! Configuration validation and error reporting

use super::types::Config;
use crate::error::Result;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an account name or store path is blank.
    pub fn validate(config: &Config) -> Result<()> {
        let accounts = [
            ("reference_account", &config.reference_account),
            ("target_account", &config.target_account),
        ];
        for (key, value) in accounts {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                anyhow::bail!("{key} cannot be empty");
            }
        }

        let stores = [
            ("reference_store", &config.reference_store),
            ("target_store", &config.target_store),
        ];
        for (key, value) in stores {
            if value.as_ref().is_some_and(|v| v.as_os_str().is_empty()) {
                anyhow::bail!("{key} cannot be empty");
            }
        }

        Ok(())
    }
}
