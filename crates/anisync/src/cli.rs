use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Anime list synchronization tool
///
/// Compare a target anime list against a reference list and write the
/// differences back to the reference list
#[derive(Parser, Debug)]
#[command(name = "anisync")]
#[command(version, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Sync without asking for confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Directory holding reference list files
    #[arg(long, global = true, value_name = "DIR")]
    pub reference_store: Option<PathBuf>,

    /// Directory holding target list files
    #[arg(long, global = true, value_name = "DIR")]
    pub target_store: Option<PathBuf>,

    /// Reference account user name
    #[arg(long, global = true, value_name = "NAME", env = "ANISYNC_REFERENCE_USER")]
    pub reference_user: Option<String>,

    /// Target account user name
    #[arg(long, global = true, value_name = "NAME", env = "ANISYNC_TARGET_USER")]
    pub target_user: Option<String>,

    /// Reference account password
    #[arg(
        long,
        global = true,
        value_name = "PASSWORD",
        env = "ANISYNC_REFERENCE_PASSWORD",
        hide_env_values = true
    )]
    pub reference_password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare both lists and report the differences
    Check {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add missing and update outdated entries on the reference list
    Sync,

    /// Check the reference account credentials
    Verify,

    /// Show active configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON of the whole diff
    Json,
}
