use anyhow::Context;

use crate::commands::CommandOptions;

pub struct Config;

impl Config {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        if options.verbose {
            println!("Executing config command");
        }

        let config = options.load_config()?;
        let dry_run = options.is_dry_run(&config);
        let assume_yes = options.skip_confirmation(&config);

        let mut effective = config;
        if let Some(store) = options.reference_store {
            effective.reference_store = Some(store.to_path_buf());
        }
        if let Some(store) = options.target_store {
            effective.target_store = Some(store.to_path_buf());
        }
        if let Some(user) = options.reference_user {
            effective.reference_account = Some(user.to_string());
        }
        if let Some(user) = options.target_user {
            effective.target_account = Some(user.to_string());
        }
        effective.dry_run = dry_run;
        effective.assume_yes = assume_yes;

        let rendered = toml::to_string_pretty(&effective).context("Failed to render config")?;
        println!("# Active configuration");
        print!("{rendered}");
        println!(
            "# reference password: {}",
            if options.reference_password.is_some() {
                "set"
            } else {
                "not set"
            }
        );

        Ok(())
    }
}
