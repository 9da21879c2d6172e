//! Reconciliation workflow: fetch, normalize, compare, sync

use thiserror::Error;
use tracing::{debug, info};

use super::SyncResult;
use super::executor::SyncExecutor;
use crate::comparison::{Diff, compare};
use crate::entry::Entry;
use crate::lookup::sort_by_id;
use crate::normalize::{from_reference, from_target, normalize_batch};
use crate::source::{ReferenceSource, Resources, SourceError, TargetSource};

/// Failure that stops a whole reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The reference list could not be fetched
    #[error("could not get reference list of {account:?}")]
    FetchReference {
        /// Account whose list was requested
        account: String,
        /// Underlying failure
        source: SourceError,
    },

    /// The target list could not be fetched
    #[error("could not get target list of {account:?}")]
    FetchTarget {
        /// Account whose list was requested
        account: String,
        /// Underlying failure
        source: SourceError,
    },

    /// Reference credentials were rejected
    #[error("could not verify reference credentials for user {user:?}")]
    Verify {
        /// User name that was checked
        user: String,
        /// Underlying failure
        source: SourceError,
    },
}

/// A sync result plus the diff recomputed afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// What the sync did
    pub result: SyncResult,
    /// Fresh comparison of both lists after the sync
    pub after: Diff,
}

/// Drives comparisons and syncs over a pair of sources
pub struct Reconciler<R, T> {
    resources: Resources<R, T>,
}

impl<R: ReferenceSource, T: TargetSource> Reconciler<R, T> {
    /// Create a reconciler over `resources`
    #[must_use]
    pub const fn new(resources: Resources<R, T>) -> Self {
        Self { resources }
    }

    /// Sources this reconciler works on
    #[must_use]
    pub const fn resources(&self) -> &Resources<R, T> {
        &self.resources
    }

    /// Check the reference user name and password
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Verify`] when the source rejects them.
    pub fn verify_reference_credentials(
        &self,
        user: &str,
        password: &str,
    ) -> Result<(), ReconcileError> {
        self.resources
            .reference
            .verify_credentials(user, password)
            .map_err(|source| ReconcileError::Verify {
                user: user.to_string(),
                source,
            })
    }

    /// Fetch and normalize the reference list of `account`, sorted by ID
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::FetchReference`] if the list cannot be fetched.
    pub fn reference_list(&self, account: &str) -> Result<Vec<Entry>, ReconcileError> {
        let raw = self
            .resources
            .reference
            .fetch_reference_list(account)
            .map_err(|source| ReconcileError::FetchReference {
                account: account.to_string(),
                source,
            })?;

        let normalized = normalize_batch(&raw, from_reference);
        debug!(
            "Reference list of {account}: {} entries, {} discarded",
            normalized.entries.len(),
            normalized.failures.len()
        );

        let mut entries = normalized.entries;
        sort_by_id(&mut entries);
        Ok(entries)
    }

    /// Fetch and normalize the target list of `account`, sorted by ID
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::FetchTarget`] if the list cannot be fetched.
    pub fn target_list(&self, account: &str) -> Result<Vec<Entry>, ReconcileError> {
        let raw = self
            .resources
            .target
            .fetch_target_list(account)
            .map_err(|source| ReconcileError::FetchTarget {
                account: account.to_string(),
                source,
            })?;

        let normalized = normalize_batch(&raw, from_target);
        debug!(
            "Target list of {account}: {} entries, {} discarded",
            normalized.entries.len(),
            normalized.failures.len()
        );

        let mut entries = normalized.entries;
        sort_by_id(&mut entries);
        Ok(entries)
    }

    /// Compare the two accounts' lists
    ///
    /// # Errors
    ///
    /// Returns an error if either list cannot be fetched.
    pub fn check(
        &self,
        reference_account: &str,
        target_account: &str,
    ) -> Result<Diff, ReconcileError> {
        let reference = self.reference_list(reference_account)?;
        let target = self.target_list(target_account)?;
        Ok(compare(&reference, &target))
    }

    /// Apply `diff` to the reference source
    #[must_use]
    pub fn sync(&self, diff: &Diff, dry_run: bool) -> SyncResult {
        let result = SyncExecutor::new(&self.resources.reference)
            .dry_run(dry_run)
            .execute(diff);

        info!(
            "{} updated, {} newly added, {} failed",
            result.updates.len(),
            result.adds.len(),
            result.total_failures()
        );
        result
    }

    /// Apply `diff`, then compare both lists again
    ///
    /// # Errors
    ///
    /// Returns an error if either list cannot be fetched after the sync.
    pub fn sync_and_recheck(
        &self,
        diff: &Diff,
        reference_account: &str,
        target_account: &str,
        dry_run: bool,
    ) -> Result<SyncReport, ReconcileError> {
        let result = self.sync(diff, dry_run);
        let after = self.check(reference_account, target_account)?;
        Ok(SyncReport { result, after })
    }
}
