//! Applying a diff to the reference source
//!
//! Every missing entry becomes a create call and every entry that needs an
//! update becomes an update call. Failures are collected per entry; the
//! batch always runs to the end.

mod executor;
mod orchestrator;
mod reporting;

use serde::Serialize;
use thiserror::Error;

pub use executor::SyncExecutor;
pub use orchestrator::{ReconcileError, Reconciler, SyncReport};
pub use reporting::{DiffReporter, SyncReporter};

use crate::comparison::EntryDiff;
use crate::entry::Entry;
use crate::error::ConvertError;
use crate::source::SourceError;

/// Why a single create or update did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The entry has no write representation
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The reference source rejected the call
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A missing entry that could not be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddFail {
    /// The entry that was to be created
    pub entry: Entry,
    /// Original error
    #[serde(skip)]
    pub error: MutationError,
    /// Rendered error for display
    pub reason: String,
}

/// An outdated entry that could not be updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateFail {
    /// The diff that was to be applied
    pub diff: EntryDiff,
    /// Original error
    #[serde(skip)]
    pub error: MutationError,
    /// Rendered error for display
    pub reason: String,
}

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    /// Entries created
    pub adds: Vec<Entry>,
    /// Creations that failed
    pub add_fails: Vec<AddFail>,
    /// Entries updated
    pub updates: Vec<EntryDiff>,
    /// Updates that failed
    pub update_fails: Vec<UpdateFail>,
}

impl SyncResult {
    /// Total successful operations
    #[must_use]
    pub fn total_operations(&self) -> usize {
        self.adds.len() + self.updates.len()
    }

    /// Total failed operations
    #[must_use]
    pub fn total_failures(&self) -> usize {
        self.add_fails.len() + self.update_fails.len()
    }

    /// Whether every operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.add_fails.is_empty() && self.update_fails.is_empty()
    }
}
