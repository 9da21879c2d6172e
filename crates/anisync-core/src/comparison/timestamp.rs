//! Timestamp ordering between a reference entry and a target entry

use std::cmp::Ordering;

use crate::entry::Entry;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Order the `last_updated` of `got` relative to `want`.
    ///
    /// Returns `None` unless both entries carry a timestamp.
    /// `Less` means the reference (`got`) is stale relative to the target.
    /// `Greater` means the reference was modified later; that direction is
    /// never propagated.
    #[must_use]
    pub fn compare_times(got: &Entry, want: &Entry) -> Option<Ordering> {
        match (got.last_updated, want.last_updated) {
            (Some(got), Some(want)) => Some(got.cmp(&want)),
            _ => None,
        }
    }

    /// Whether the reference entry was last updated before the target entry
    #[must_use]
    pub fn is_stale(got: &Entry, want: &Entry) -> bool {
        Self::compare_times(got, want) == Some(Ordering::Less)
    }
}
