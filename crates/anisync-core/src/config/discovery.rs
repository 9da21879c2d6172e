//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.anisync.local)
    pub local: Option<PathBuf>,
    /// Project config (.anisync)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Discovered files from lowest to highest precedence
    pub fn in_merge_order(&self) -> impl Iterator<Item = &Path> {
        [&self.global, &self.project, &self.local, &self.cli]
            .into_iter()
            .filter_map(|path| path.as_deref())
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let cli = cli_path.filter(|p| p.is_file()).map(Path::to_path_buf);

        let local = Self::find_file(".anisync.local");
        let project = Self::find_file(".anisync");
        let global = Self::find_global_config();

        ConfigFiles {
            cli,
            local,
            project,
            global,
        }
    }

    /// Find a config file in the current directory or parent directories
    fn find_file(name: &str) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("anisync").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}
