//! The canonical representation of one tracked anime.
//!
//! Both sources are normalized into [`Entry`] before comparison. An entry is
//! never mutated by the engine; diffs and sync results hold copies.

mod rating;
mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use rating::Rating;
pub use status::Status;

/// Cross-source identifier. `0` is never assigned and means "unresolved".
pub type EntryId = u32;

/// One tracked item after normalization
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier shared by both sources
    pub id: EntryId,
    /// Display title, never diffed
    pub title: String,
    /// Watch status
    pub status: Status,
    /// Number of episodes watched
    pub episodes_watched: u32,
    /// Last modification time, if the source reports one
    pub last_updated: Option<DateTime<Utc>>,
    /// Rating on a 0.0 to 5.0 scale, empty when unrated
    pub rating: Rating,
    /// Free text notes; `None` when the source cannot supply them
    pub notes: Option<String>,
    /// Number of completed rewatches
    pub times_rewatched: u32,
    /// Currently in a repeat viewing
    pub rewatching: bool,
    /// Cover image URL, never diffed
    pub image: String,
}

impl Entry {
    /// Whether the entry carries an assigned ID
    #[must_use]
    pub const fn has_valid_id(&self) -> bool {
        self.id != 0
    }
}
