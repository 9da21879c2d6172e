//! List comparison and per-entry classification
//!
//! This module is pure and read-only:
//! - Matching target entries to reference entries by ID
//! - Field-level diffs between matched entries
//! - Classification into missing, need update, up to date and uncertain

mod fields;
mod timestamp;


use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use fields::{EntryDiff, FieldDiff, compare_entries};
pub use timestamp::TimestampComparator;

use crate::entry::Entry;
use crate::lookup::{find_by_id, is_sorted_by_id, sort_by_id};

/// How a matched pair of entries relates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Nothing material differs
    UpToDate,
    /// At least one material field differs
    NeedsUpdate,
    /// Only the reference timestamp is older; not applied automatically
    Uncertain,
}

/// Result of one reconciliation pass.
///
/// `missing`, `need_update`, `up_to_date` and `uncertain` partition `target`:
/// every target entry lands in exactly one of them, in target order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diff {
    /// Reference list as given
    pub reference: Vec<Entry>,
    /// Target list as given
    pub target: Vec<Entry>,
    /// Target entries absent from the reference list
    pub missing: Vec<Entry>,
    /// Matched entries with material differences
    pub need_update: Vec<EntryDiff>,
    /// Matched entries with no material difference
    pub up_to_date: Vec<Entry>,
    /// Matched entries that differ only by an older reference timestamp
    pub uncertain: Vec<EntryDiff>,
}

impl Diff {
    /// Whether nothing needs to be added or updated
    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.missing.is_empty() && self.need_update.is_empty()
    }

    /// Number of entries a sync would touch
    #[must_use]
    pub fn actionable(&self) -> usize {
        self.missing.len() + self.need_update.len()
    }
}

/// Compare a reference list against a target list.
///
/// `reference` should be sorted by ID; if it is not, a sorted copy is used
/// for matching. `Diff::reference` always holds the list as given.
#[must_use]
pub fn compare(reference: &[Entry], target: &[Entry]) -> Diff {
    let sorted: Cow<'_, [Entry]> = if is_sorted_by_id(reference) {
        Cow::Borrowed(reference)
    } else {
        let mut owned = reference.to_vec();
        sort_by_id(&mut owned);
        Cow::Owned(owned)
    };

    let mut diff = Diff {
        reference: reference.to_vec(),
        target: target.to_vec(),
        ..Diff::default()
    };

    for want in target {
        let Some(got) = find_by_id(&sorted, want.id) else {
            diff.missing.push(want.clone());
            continue;
        };

        let entry_diff = compare_entries(got, want);
        match entry_diff.classification() {
            Classification::NeedsUpdate => diff.need_update.push(entry_diff),
            Classification::Uncertain => diff.uncertain.push(entry_diff),
            Classification::UpToDate => diff.up_to_date.push(want.clone()),
        }
    }

    debug!(
        missing = diff.missing.len(),
        need_update = diff.need_update.len(),
        up_to_date = diff.up_to_date.len(),
        uncertain = diff.uncertain.len(),
        "compared lists"
    );

    diff
}
