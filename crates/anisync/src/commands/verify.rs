use anisync_core::ReferenceSource;
use anisync_core::source::FileReferenceStore;
use anyhow::Context;

use crate::commands::CommandOptions;

pub struct Verify;

impl Verify {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        let config = options.load_config()?;
        let (store, user) = options.reference_side(&config)?;
        let password = options.reference_password(&user)?;

        FileReferenceStore::new(store)
            .verify_credentials(&user, &password)
            .with_context(|| format!("Could not verify reference credentials for user {user:?}"))?;

        println!("Verification was successful!");
        Ok(())
    }
}
