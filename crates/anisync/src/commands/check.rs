use anisync_core::sync::DiffReporter;
use anyhow::Context;

use crate::cli::OutputFormat;
use crate::commands::CommandOptions;

pub struct Check;

impl Check {
    pub fn execute(format: OutputFormat, options: &CommandOptions) -> anyhow::Result<()> {
        let session = options.session()?;

        let diff = session
            .reader()
            .check(&session.reference_account, &session.target_account)?;

        match format {
            OutputFormat::Text => {
                print!("{}", DiffReporter::render(&diff, &session.reference_account));
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&diff).context("Failed to serialize diff")?;
                println!("{json}");
            }
        }

        Ok(())
    }
}
