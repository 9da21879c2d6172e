//! Error types shared across the library

use thiserror::Error;

use crate::entry::EntryId;

/// Result type alias using `anyhow::Error`, used by configuration loading
pub type Result<T> = anyhow::Result<T>;

/// A raw source record that could not be turned into an [`Entry`](crate::Entry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Status code is not in the fixed status table
    #[error("invalid status {code:?} in entry (ID: {id}, Title: {title:?})")]
    InvalidStatus {
        /// Entry ID as far as it could be read
        id: EntryId,
        /// Entry title
        title: String,
        /// Offending status code
        code: String,
    },

    /// Timestamp could not be parsed
    #[error("invalid timestamp {value:?} in entry (ID: {id}, Title: {title:?})")]
    InvalidTimestamp {
        /// Entry ID as far as it could be read
        id: EntryId,
        /// Entry title
        title: String,
        /// Offending timestamp text
        value: String,
    },

    /// Cross-source ID mapping is not an integer
    #[error("invalid external ID {value:?} in entry (Title: {title:?})")]
    InvalidId {
        /// Entry title
        title: String,
        /// Offending ID text
        value: String,
    },

    /// Rating is not a decimal in 0.0..=5.0, or a score is above 10
    #[error("invalid rating {value:?} in entry (ID: {id}, Title: {title:?})")]
    InvalidRating {
        /// Entry ID
        id: EntryId,
        /// Entry title
        title: String,
        /// Offending rating text
        value: String,
    },
}

/// A canonical value that has no representation on the reference side
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// `Status::Unknown` cannot be written
    #[error("no reference status code for unknown status")]
    UnknownStatus,

    /// Rating is not a decimal in `0.0..=5.0`
    #[error("rating {0:?} cannot be converted to a score")]
    InvalidRating(String),
}
