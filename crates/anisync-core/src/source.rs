//! Capabilities the engine needs from the two list sources
//!
//! The engine never names a concrete client. A reference source can be read,
//! written and asked to check credentials; a target source can only be read.

mod file;
mod memory;

use chrono::Utc;
use thiserror::Error;

pub use file::{FileReferenceStore, FileTargetStore, hash_password};
pub use memory::{InMemorySource, Mutation};

use crate::entry::EntryId;
use crate::normalize::{RawReferenceEntry, RawTargetEntry, WireEntry};

/// Failure reported by a source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// No entry with this ID in the list
    #[error("entry {0} not found")]
    NotFound(EntryId),

    /// The list already holds an entry with this ID
    #[error("entry {0} already exists")]
    AlreadyExists(EntryId),

    /// The ID can never be valid
    #[error("invalid entry ID {0}")]
    InvalidId(EntryId),

    /// Credentials missing or rejected
    #[error("credentials rejected for account {0:?}")]
    Unauthorized(String),

    /// No list for this account
    #[error("unknown account {0:?}")]
    UnknownAccount(String),

    /// Underlying I/O failed
    #[error("{context}: {message}")]
    Io {
        /// What was being done
        context: String,
        /// Rendered cause
        message: String,
    },

    /// Source data could not be decoded
    #[error("malformed data in {context}: {message}")]
    Malformed {
        /// Where the data came from
        context: String,
        /// Rendered cause
        message: String,
    },
}

/// The list that receives writes
pub trait ReferenceSource {
    /// Fetch the raw list of `account`
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be retrieved.
    fn fetch_reference_list(&self, account: &str) -> Result<Vec<RawReferenceEntry>, SourceError>;

    /// Add a new entry with `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be created.
    fn create_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError>;

    /// Replace the values of the entry with `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be updated.
    fn update_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError>;

    /// Check a user name and password
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unauthorized`] if they do not match.
    fn verify_credentials(&self, user: &str, password: &str) -> Result<(), SourceError>;
}

/// The list that describes the desired state; read only
pub trait TargetSource {
    /// Fetch the raw list of `account`
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be retrieved.
    fn fetch_target_list(&self, account: &str) -> Result<Vec<RawTargetEntry>, SourceError>;
}

impl<T: ReferenceSource + ?Sized> ReferenceSource for &T {
    fn fetch_reference_list(&self, account: &str) -> Result<Vec<RawReferenceEntry>, SourceError> {
        (**self).fetch_reference_list(account)
    }

    fn create_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        (**self).create_entry(id, entry)
    }

    fn update_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        (**self).update_entry(id, entry)
    }

    fn verify_credentials(&self, user: &str, password: &str) -> Result<(), SourceError> {
        (**self).verify_credentials(user, password)
    }
}

impl<T: ReferenceSource + ?Sized> ReferenceSource for Box<T> {
    fn fetch_reference_list(&self, account: &str) -> Result<Vec<RawReferenceEntry>, SourceError> {
        (**self).fetch_reference_list(account)
    }

    fn create_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        (**self).create_entry(id, entry)
    }

    fn update_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        (**self).update_entry(id, entry)
    }

    fn verify_credentials(&self, user: &str, password: &str) -> Result<(), SourceError> {
        (**self).verify_credentials(user, password)
    }
}

impl<T: TargetSource + ?Sized> TargetSource for &T {
    fn fetch_target_list(&self, account: &str) -> Result<Vec<RawTargetEntry>, SourceError> {
        (**self).fetch_target_list(account)
    }
}

impl<T: TargetSource + ?Sized> TargetSource for Box<T> {
    fn fetch_target_list(&self, account: &str) -> Result<Vec<RawTargetEntry>, SourceError> {
        (**self).fetch_target_list(account)
    }
}

/// One handle per source, composed explicitly
#[derive(Debug, Clone)]
pub struct Resources<R, T> {
    /// Reference source handle
    pub reference: R,
    /// Target source handle
    pub target: T,
}

impl<R: ReferenceSource, T: TargetSource> Resources<R, T> {
    /// Pair a reference source with a target source
    #[must_use]
    pub const fn new(reference: R, target: T) -> Self {
        Self { reference, target }
    }
}

/// Overwrite the user-editable fields of `raw` and stamp it with the current time
fn apply_wire(raw: &mut RawReferenceEntry, wire: &WireEntry) {
    raw.my_watched_episodes = wire.episode;
    raw.my_status = i64::from(wire.status);
    raw.my_score = wire.score;
    raw.my_rewatching_ep = wire.times_rewatched;
    raw.my_rewatching = if wire.enable_rewatching == 1 { "1" } else { "0" }.to_string();
    raw.my_last_updated = Utc::now().timestamp().to_string();
}

fn new_reference_entry(id: EntryId, wire: &WireEntry) -> RawReferenceEntry {
    let mut raw = RawReferenceEntry {
        series_animedb_id: id,
        ..RawReferenceEntry::default()
    };
    apply_wire(&mut raw, wire);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_messages() {
        assert_eq!(SourceError::NotFound(7).to_string(), "entry 7 not found");
        assert_eq!(
            SourceError::Unauthorized("fan".to_string()).to_string(),
            "credentials rejected for account \"fan\""
        );
        assert_eq!(
            SourceError::Io {
                context: "reading list".to_string(),
                message: "denied".to_string(),
            }
            .to_string(),
            "reading list: denied"
        );
    }

    #[test]
    fn test_boxed_sources_delegate() {
        let source = InMemorySource::new();
        source.insert_target("fan", Vec::new());

        let boxed: Box<dyn TargetSource> = Box::new(source.clone());
        assert_eq!(boxed.fetch_target_list("fan"), Ok(Vec::new()));

        let borrowed = &source;
        assert!(matches!(
            TargetSource::fetch_target_list(&borrowed, "nobody"),
            Err(SourceError::UnknownAccount(_))
        ));
    }
}
