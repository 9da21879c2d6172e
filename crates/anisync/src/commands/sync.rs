use anisync_core::sync::{DiffReporter, SyncReporter};

use crate::commands::CommandOptions;
use crate::interactive::Prompter;

pub struct Sync;

impl Sync {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        let session = options.session()?;
        let password = options.reference_password(&session.reference_account)?;
        let dry_run = options.is_dry_run(&session.config);

        let reconciler = session.writer(&password);
        reconciler.verify_reference_credentials(&session.reference_account, &password)?;
        println!("Verification was successful!");

        let diff = reconciler.check(&session.reference_account, &session.target_account)?;
        print!("{}", DiffReporter::render(&diff, &session.reference_account));

        if diff.is_in_sync() {
            println!(
                "No entries need to be added or updated in reference account {:?}.",
                session.reference_account
            );
            return Ok(());
        }

        let proceed = options.skip_confirmation(&session.config) || dry_run || Prompter::confirm()?;
        if !proceed {
            println!("Sync cancelled.");
            return Ok(());
        }

        if dry_run {
            println!("[DRY RUN] No changes will be written.");
        }
        println!("Starting update...");

        let report = reconciler.sync_and_recheck(
            &diff,
            &session.reference_account,
            &session.target_account,
            dry_run,
        )?;

        println!("{}", SyncReporter::generate_summary(&report.result));
        println!(
            "Remaining: {} missing, {} need update.",
            report.after.missing.len(),
            report.after.need_update.len()
        );

        let failures = report.result.total_failures();
        if failures > 0 {
            anyhow::bail!("{failures} entries failed to sync");
        }

        Ok(())
    }
}
