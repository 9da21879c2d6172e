//! Reference-side write representation

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::ConvertError;

/// Values sent to the reference source when creating or updating an entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireEntry {
    /// Episodes watched
    pub episode: u32,
    /// Numeric status code
    pub status: u8,
    /// Score on a 0-10 scale, 0 when unrated
    pub score: u8,
    /// Notes, empty when unknown
    pub comments: String,
    /// Times rewatched
    pub times_rewatched: u32,
    /// `1` while rewatching
    pub enable_rewatching: u8,
}

impl WireEntry {
    /// Build the write representation of `entry`
    ///
    /// # Errors
    ///
    /// Fails with [`ConvertError::UnknownStatus`] when the entry has no known
    /// status, and [`ConvertError::InvalidRating`] when its rating has no
    /// score equivalent.
    pub fn from_entry(entry: &Entry) -> Result<Self, ConvertError> {
        Ok(Self {
            episode: entry.episodes_watched,
            status: entry.status.reference_code()?,
            score: entry.rating.to_score()?,
            comments: entry.notes.clone().unwrap_or_default(),
            times_rewatched: entry.times_rewatched,
            enable_rewatching: u8::from(entry.rewatching),
        })
    }
}
