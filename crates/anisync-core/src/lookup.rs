//! Binary search over entry lists sorted by ID.
//!
//! Sortedness is the caller's responsibility. An unsorted slice gives wrong
//! answers, never a panic.

use crate::entry::{Entry, EntryId};

/// Find the entry with `id` in a slice sorted ascending by ID.
///
/// With duplicate IDs the first occurrence wins.
#[must_use]
pub fn find_by_id(entries: &[Entry], id: EntryId) -> Option<&Entry> {
    let index = entries.partition_point(|entry| entry.id < id);
    entries.get(index).filter(|entry| entry.id == id)
}

/// Stable sort by ID
pub fn sort_by_id(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.id);
}

/// Whether the slice is ascending by ID
#[must_use]
pub fn is_sorted_by_id(entries: &[Entry]) -> bool {
    entries.windows(2).all(|pair| pair[0].id <= pair[1].id)
}
