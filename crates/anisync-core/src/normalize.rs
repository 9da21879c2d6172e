//! Mapping raw source records to canonical entries and back
//!
//! Each source has its own raw shape. A bad record never fails a whole
//! batch: it is logged, reported in [`Normalized::failures`] and skipped.

mod reference;
mod target;
mod wire;

use tracing::warn;

pub use reference::{RawReferenceEntry, from_reference};
pub use target::{MAPPING_SITE, RawMapping, RawMedia, RawTargetEntry, from_target};
pub use wire::WireEntry;

use crate::entry::Entry;
use crate::error::NormalizeError;

/// A record dropped from a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeFailure {
    /// Position of the record in the raw list
    pub index: usize,
    /// Why it was dropped
    pub error: NormalizeError,
}

/// Outcome of normalizing a whole raw list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Records that converted cleanly, in input order
    pub entries: Vec<Entry>,
    /// Records that were dropped
    pub failures: Vec<NormalizeFailure>,
}

/// Normalize every record with `convert`, keeping the ones that succeed
pub fn normalize_batch<R, F>(raw: &[R], convert: F) -> Normalized
where
    F: Fn(&R) -> Result<Entry, NormalizeError>,
{
    let mut normalized = Normalized::default();

    for (index, record) in raw.iter().enumerate() {
        match convert(record) {
            Ok(entry) => normalized.entries.push(entry),
            Err(error) => {
                warn!("Discarded entry: {error}");
                normalized.failures.push(NormalizeFailure { index, error });
            }
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Status;

    fn raw(id: u32, status: i64, updated: &str) -> RawReferenceEntry {
        RawReferenceEntry {
            series_animedb_id: id,
            series_title: format!("Anime{id}"),
            my_status: status,
            my_last_updated: updated.to_string(),
            ..RawReferenceEntry::default()
        }
    }

    #[test]
    fn test_batch_keeps_good_records() {
        let list = vec![
            raw(1, 1, "1450000000"),
            raw(2, 9, "1450000000"),
            raw(3, 2, "yesterday"),
            raw(4, 6, "1450000000"),
        ];

        let normalized = normalize_batch(&list, from_reference);

        let ids: Vec<_> = normalized.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(normalized.entries[1].status, Status::Planned);

        assert_eq!(normalized.failures.len(), 2);
        assert_eq!(normalized.failures[0].index, 1);
        assert!(matches!(
            normalized.failures[0].error,
            NormalizeError::InvalidStatus { id: 2, .. }
        ));
        assert_eq!(normalized.failures[1].index, 2);
        assert!(matches!(
            normalized.failures[1].error,
            NormalizeError::InvalidTimestamp { id: 3, .. }
        ));
    }

    #[test]
    fn test_batch_empty() {
        let list: Vec<RawTargetEntry> = Vec::new();
        let normalized = normalize_batch(&list, from_target);
        assert!(normalized.entries.is_empty());
        assert!(normalized.failures.is_empty());
    }
}
