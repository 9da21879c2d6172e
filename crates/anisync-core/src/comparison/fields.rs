//! Field-level diff between a matched reference entry and target entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Classification;
use super::timestamp::TimestampComparator;
use crate::entry::{Entry, Rating, Status};

/// One differing field: what the reference has and what the target wants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff<T> {
    /// Reference-side value
    pub got: T,
    /// Target-side value
    pub want: T,
}

impl<T: PartialEq> FieldDiff<T> {
    fn when_different(got: T, want: T) -> Option<Self> {
        (got != want).then_some(Self { got, want })
    }
}

/// A target entry plus the fields that differ from its reference match.
///
/// Notes, title, image and rewatch count are never compared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryDiff {
    /// The target entry, i.e. the values to write
    pub entry: Entry,
    /// Status differs
    pub status: Option<FieldDiff<Status>>,
    /// Episode count differs
    pub episodes_watched: Option<FieldDiff<u32>>,
    /// Rating differs, other than `""` against `"0.0"`
    pub rating: Option<FieldDiff<Rating>>,
    /// Rewatching flag differs
    pub rewatching: Option<FieldDiff<bool>>,
    /// Reference timestamp is older than the target's
    pub last_updated: Option<FieldDiff<DateTime<Utc>>>,
}

impl EntryDiff {
    /// Whether any field other than the timestamp differs
    #[must_use]
    pub const fn has_material_change(&self) -> bool {
        self.status.is_some()
            || self.episodes_watched.is_some()
            || self.rating.is_some()
            || self.rewatching.is_some()
    }

    /// Classify the pair this diff was computed from.
    ///
    /// The reference source does not bump its timestamp for every kind of
    /// change, so a stale timestamp on its own is reported as uncertain
    /// instead of triggering a write.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        if self.has_material_change() {
            Classification::NeedsUpdate
        } else if self.last_updated.is_some() {
            Classification::Uncertain
        } else {
            Classification::UpToDate
        }
    }
}

/// Diff `got` (reference) against `want` (target)
#[must_use]
pub fn compare_entries(got: &Entry, want: &Entry) -> EntryDiff {
    // The reference source reports an unrated entry as "0.0" while the
    // target leaves it empty.
    let rating = if got.rating.is_unrated() && want.rating.is_unrated() {
        None
    } else {
        FieldDiff::when_different(got.rating.clone(), want.rating.clone())
    };

    let last_updated = match (got.last_updated, want.last_updated) {
        (Some(got_time), Some(want_time)) if TimestampComparator::is_stale(got, want) => {
            Some(FieldDiff {
                got: got_time,
                want: want_time,
            })
        }
        _ => None,
    };

    EntryDiff {
        entry: want.clone(),
        status: FieldDiff::when_different(got.status, want.status),
        episodes_watched: FieldDiff::when_different(got.episodes_watched, want.episodes_watched),
        rating,
        rewatching: FieldDiff::when_different(got.rewatching, want.rewatching),
        last_updated,
    }
}
