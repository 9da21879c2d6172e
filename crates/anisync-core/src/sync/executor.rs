//! Sequential create/update executor

use tracing::info;

use super::{AddFail, MutationError, SyncResult, UpdateFail};
use crate::comparison::{Diff, EntryDiff};
use crate::entry::Entry;
use crate::normalize::WireEntry;
use crate::source::ReferenceSource;

/// Replays a diff against a reference source, one call per entry
pub struct SyncExecutor<'a, R: ?Sized> {
    source: &'a R,
    dry_run: bool,
}

impl<'a, R: ReferenceSource + ?Sized> SyncExecutor<'a, R> {
    /// Create an executor writing to `source`
    #[must_use]
    pub const fn new(source: &'a R) -> Self {
        Self {
            source,
            dry_run: false,
        }
    }

    /// Report would-be operations without calling the source
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Create every missing entry and update every outdated one.
    ///
    /// Never fails as a whole: each entry ends up in exactly one of the
    /// success or failure lists of the returned [`SyncResult`].
    #[must_use]
    pub fn execute(&self, diff: &Diff) -> SyncResult {
        let mut result = SyncResult::default();

        for entry in &diff.missing {
            match self.add(entry) {
                Ok(()) => result.adds.push(entry.clone()),
                Err(error) => {
                    info!("Failed to add {} {}: {error}", entry.id, entry.title);
                    result.add_fails.push(AddFail {
                        entry: entry.clone(),
                        reason: error.to_string(),
                        error,
                    });
                }
            }
        }

        for entry_diff in &diff.need_update {
            match self.update(entry_diff) {
                Ok(()) => result.updates.push(entry_diff.clone()),
                Err(error) => {
                    let entry = &entry_diff.entry;
                    info!("Failed to update {} {}: {error}", entry.id, entry.title);
                    result.update_fails.push(UpdateFail {
                        diff: entry_diff.clone(),
                        reason: error.to_string(),
                        error,
                    });
                }
            }
        }

        result
    }

    fn add(&self, entry: &Entry) -> Result<(), MutationError> {
        let wire = WireEntry::from_entry(entry)?;

        if self.dry_run {
            info!("[DRY RUN] Would add {} {}: {wire:?}", entry.id, entry.title);
            return Ok(());
        }

        self.source.create_entry(entry.id, &wire)?;
        info!("Added {} {}: {wire:?}", entry.id, entry.title);
        Ok(())
    }

    fn update(&self, entry_diff: &EntryDiff) -> Result<(), MutationError> {
        let entry = &entry_diff.entry;
        let wire = WireEntry::from_entry(entry)?;

        if self.dry_run {
            info!("[DRY RUN] Would update {} {}: {wire:?}", entry.id, entry.title);
            return Ok(());
        }

        self.source.update_entry(entry.id, &wire)?;
        info!("Updated {} {}: {wire:?}", entry.id, entry.title);
        Ok(())
    }
}
