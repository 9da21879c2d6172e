//! Options shared by all commands and resolution of their inputs

use std::path::{Path, PathBuf};

use anisync_core::Reconciler;
use anisync_core::config::{Config, ConfigManager};
use anisync_core::source::{FileReferenceStore, FileTargetStore, Resources};
use anyhow::Context;
use tracing::debug;

use crate::cli::Cli;
use crate::interactive::Prompter;

/// Reconciler over the file-backed stores
pub type FileReconciler = Reconciler<FileReferenceStore, FileTargetStore>;

/// Execution options taken from the command line
#[allow(clippy::struct_excessive_bools)]
pub struct CommandOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
    /// Sync without asking for confirmation
    pub assume_yes: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
    /// Reference store directory
    pub reference_store: Option<&'a Path>,
    /// Target store directory
    pub target_store: Option<&'a Path>,
    /// Reference user name
    pub reference_user: Option<&'a str>,
    /// Target user name
    pub target_user: Option<&'a str>,
    /// Reference password
    pub reference_password: Option<&'a str>,
}

/// Everything a command needs once flags, config and prompts are combined
pub struct Session {
    /// Merged configuration
    pub config: Config,
    /// Reference account name
    pub reference_account: String,
    /// Target account name
    pub target_account: String,
    reference_store: PathBuf,
    target_store: PathBuf,
}

impl<'a> CommandOptions<'a> {
    /// Borrow options from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &'a Cli) -> Self {
        Self {
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            assume_yes: cli.yes,
            config_path: cli.config.as_deref(),
            no_config: cli.no_config,
            reference_store: cli.reference_store.as_deref(),
            target_store: cli.target_store.as_deref(),
            reference_user: cli.reference_user.as_deref(),
            target_user: cli.target_user.as_deref(),
            reference_password: cli.reference_password.as_deref(),
        }
    }

    /// Load configuration files unless `--no-config` was given
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if self.no_config {
            return Ok(Config::default());
        }
        ConfigManager::load(self.config_path)
    }

    /// Whether a sync should only be previewed
    #[must_use]
    pub const fn is_dry_run(&self, config: &Config) -> bool {
        self.dry_run || config.dry_run
    }

    /// Whether the confirmation prompt is skipped
    #[must_use]
    pub const fn skip_confirmation(&self, config: &Config) -> bool {
        self.assume_yes || config.assume_yes
    }

    /// Reference store and account, prompting for the account if needed
    pub fn reference_side(&self, config: &Config) -> anyhow::Result<(PathBuf, String)> {
        let store = self
            .reference_store
            .map(Path::to_path_buf)
            .or_else(|| config.reference_store.clone())
            .context("No reference store given (use --reference-store or set reference_store)")?;

        let account = match self.reference_user.or(config.reference_account.as_deref()) {
            Some(user) => user.to_string(),
            None => Prompter::text(
                "Reference user name",
                "No reference user given (use --reference-user or ANISYNC_REFERENCE_USER)",
            )?,
        };

        Ok((store, account))
    }

    /// Target store and account, prompting for the account if needed
    pub fn target_side(&self, config: &Config) -> anyhow::Result<(PathBuf, String)> {
        let store = self
            .target_store
            .map(Path::to_path_buf)
            .or_else(|| config.target_store.clone())
            .context("No target store given (use --target-store or set target_store)")?;

        let account = match self.target_user.or(config.target_account.as_deref()) {
            Some(user) => user.to_string(),
            None => Prompter::text(
                "Target user name",
                "No target user given (use --target-user or ANISYNC_TARGET_USER)",
            )?,
        };

        Ok((store, account))
    }

    /// Combine flags, environment, config and prompts into a session
    pub fn session(&self) -> anyhow::Result<Session> {
        let config = self.load_config()?;
        let (reference_store, reference_account) = self.reference_side(&config)?;
        let (target_store, target_account) = self.target_side(&config)?;

        if self.verbose {
            println!("Reference store: {}", reference_store.display());
            println!("Target store: {}", target_store.display());
        }
        debug!("Reconciling {target_account:?} into {reference_account:?}");

        Ok(Session {
            config,
            reference_account,
            target_account,
            reference_store,
            target_store,
        })
    }

    /// Password for the reference account `user`, prompting if needed
    pub fn reference_password(&self, user: &str) -> anyhow::Result<String> {
        match self.reference_password {
            Some(password) => Ok(password.to_string()),
            None => Prompter::password(
                &format!("Password for reference user {user:?}"),
                "No reference password given (use --reference-password or ANISYNC_REFERENCE_PASSWORD)",
            ),
        }
    }
}

impl Session {
    /// Reconciler that reads both stores; writes are rejected
    #[must_use]
    pub fn reader(&self) -> FileReconciler {
        Reconciler::new(Resources::new(
            FileReferenceStore::new(&self.reference_store),
            FileTargetStore::new(&self.target_store),
        ))
    }

    /// Reconciler that writes as the reference account
    #[must_use]
    pub fn writer(&self, password: &str) -> FileReconciler {
        Reconciler::new(Resources::new(
            FileReferenceStore::new(&self.reference_store)
                .with_credentials(&self.reference_account, password),
            FileTargetStore::new(&self.target_store),
        ))
    }
}
