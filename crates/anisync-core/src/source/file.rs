//! Sources backed by JSON files, one file per account

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{ReferenceSource, SourceError, TargetSource, apply_wire, new_reference_entry};
use crate::entry::EntryId;
use crate::normalize::{RawReferenceEntry, RawTargetEntry, WireEntry};

/// Hex-encoded SHA-256 of `password`, as stored in reference list files
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// A reference entry plus the notes only the write path knows about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(flatten)]
    raw: RawReferenceEntry,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comments: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ReferenceFile {
    password_sha256: String,
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

/// Path of the list file for `account` under `dir`
fn account_path(dir: &Path, account: &str) -> Result<PathBuf, SourceError> {
    let plain = !account.is_empty()
        && account
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !account.starts_with('.');
    if !plain {
        return Err(SourceError::UnknownAccount(account.to_string()));
    }
    Ok(dir.join(format!("{account}.json")))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, account: &str) -> Result<T, SourceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SourceError::UnknownAccount(account.to_string()));
        }
        Err(e) => {
            return Err(SourceError::Io {
                context: format!("Failed to read {}", path.display()),
                message: e.to_string(),
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| SourceError::Malformed {
        context: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write through a sibling temporary file so readers never see half a list
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SourceError> {
    let io_error = |e: std::io::Error| SourceError::Io {
        context: format!("Failed to write {}", path.display()),
        message: e.to_string(),
    };

    let content = serde_json::to_string_pretty(value).map_err(|e| SourceError::Malformed {
        context: path.display().to_string(),
        message: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(io_error)?;
    fs::rename(&tmp, path).map_err(io_error)
}

/// Reference lists stored as `<account>.json` in a directory.
///
/// Each file holds the account's password hash and its entries. Writes go
/// to the account bound with [`with_credentials`](Self::with_credentials)
/// and re-check the password every time.
#[derive(Debug, Clone)]
pub struct FileReferenceStore {
    dir: PathBuf,
    credentials: Option<(String, String)>,
}

impl FileReferenceStore {
    /// Open the store rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            credentials: None,
        }
    }

    /// Bind the account that receives writes
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    /// Directory holding the list files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self, account: &str) -> Result<(PathBuf, ReferenceFile), SourceError> {
        let path = account_path(&self.dir, account)?;
        let file = read_json(&path, account)?;
        Ok((path, file))
    }

    fn check_password(file: &ReferenceFile, user: &str, password: &str) -> Result<(), SourceError> {
        if file.password_sha256.eq_ignore_ascii_case(&hash_password(password)) {
            Ok(())
        } else {
            Err(SourceError::Unauthorized(user.to_string()))
        }
    }

    /// Load the bound account's file for a write
    fn load_for_write(&self, id: EntryId) -> Result<(PathBuf, ReferenceFile), SourceError> {
        if id == 0 {
            return Err(SourceError::InvalidId(id));
        }
        let Some((user, password)) = &self.credentials else {
            return Err(SourceError::Unauthorized(String::new()));
        };
        let (path, file) = self.load(user).map_err(|e| match e {
            SourceError::UnknownAccount(account) => SourceError::Unauthorized(account),
            other => other,
        })?;
        Self::check_password(&file, user, password)?;
        Ok((path, file))
    }
}

impl ReferenceSource for FileReferenceStore {
    fn fetch_reference_list(&self, account: &str) -> Result<Vec<RawReferenceEntry>, SourceError> {
        let (path, file) = self.load(account)?;
        debug!(
            "Read {} reference entries from {}",
            file.entries.len(),
            path.display()
        );
        Ok(file.entries.into_iter().map(|stored| stored.raw).collect())
    }

    fn create_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        let (path, mut file) = self.load_for_write(id)?;

        if file.entries.iter().any(|e| e.raw.series_animedb_id == id) {
            return Err(SourceError::AlreadyExists(id));
        }
        file.entries.push(StoredEntry {
            raw: new_reference_entry(id, entry),
            comments: entry.comments.clone(),
        });
        file.entries.sort_by_key(|e| e.raw.series_animedb_id);

        write_json(&path, &file)
    }

    fn update_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        let (path, mut file) = self.load_for_write(id)?;

        let stored = file
            .entries
            .iter_mut()
            .find(|e| e.raw.series_animedb_id == id)
            .ok_or(SourceError::NotFound(id))?;
        apply_wire(&mut stored.raw, entry);
        stored.comments.clone_from(&entry.comments);

        write_json(&path, &file)
    }

    fn verify_credentials(&self, user: &str, password: &str) -> Result<(), SourceError> {
        let (_, file) = self.load(user).map_err(|e| match e {
            SourceError::UnknownAccount(account) => SourceError::Unauthorized(account),
            other => other,
        })?;
        Self::check_password(&file, user, password)
    }
}

/// Target lists stored as `<account>.json` arrays in a directory
#[derive(Debug, Clone)]
pub struct FileTargetStore {
    dir: PathBuf,
}

impl FileTargetStore {
    /// Open the store rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TargetSource for FileTargetStore {
    fn fetch_target_list(&self, account: &str) -> Result<Vec<RawTargetEntry>, SourceError> {
        let path = account_path(&self.dir, account)?;
        let entries: Vec<RawTargetEntry> = read_json(&path, account)?;
        debug!(
            "Read {} target entries from {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_reference(dir: &Path, account: &str, password: &str, entries: serde_json::Value) {
        let content = json!({
            "password_sha256": hash_password(password),
            "entries": entries,
        });
        fs::write(dir.join(format!("{account}.json")), content.to_string()).unwrap();
    }

    #[test]
    fn test_hash_password() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fetch_reference_list() {
        let tmp = TempDir::new().unwrap();
        write_reference(
            tmp.path(),
            "fan",
            "pw",
            json!([
                {"series_animedb_id": 1, "series_title": "Anime1", "my_status": 2,
                 "my_last_updated": "1500000000"},
                {"series_animedb_id": 4, "my_status": 6}
            ]),
        );

        let store = FileReferenceStore::new(tmp.path());
        let list = store.fetch_reference_list("fan").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].series_title, "Anime1");
        assert_eq!(list[0].my_status, 2);
        assert_eq!(list[1].series_animedb_id, 4);
    }

    #[test]
    fn test_unknown_and_unsafe_accounts() {
        let tmp = TempDir::new().unwrap();
        let store = FileReferenceStore::new(tmp.path());

        assert_eq!(
            store.fetch_reference_list("ghost"),
            Err(SourceError::UnknownAccount("ghost".to_string()))
        );
        assert!(matches!(
            store.fetch_reference_list("../etc/passwd"),
            Err(SourceError::UnknownAccount(_))
        ));
        assert!(matches!(
            store.fetch_reference_list(""),
            Err(SourceError::UnknownAccount(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fan.json"), "{ not json").unwrap();

        let store = FileReferenceStore::new(tmp.path());
        assert!(matches!(
            store.fetch_reference_list("fan"),
            Err(SourceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_verify_credentials() {
        let tmp = TempDir::new().unwrap();
        write_reference(tmp.path(), "fan", "hunter2", json!([]));
        let store = FileReferenceStore::new(tmp.path());

        assert_eq!(store.verify_credentials("fan", "hunter2"), Ok(()));
        assert_eq!(
            store.verify_credentials("fan", "wrong"),
            Err(SourceError::Unauthorized("fan".to_string()))
        );
        assert_eq!(
            store.verify_credentials("ghost", "hunter2"),
            Err(SourceError::Unauthorized("ghost".to_string()))
        );
    }

    #[test]
    fn test_create_and_update_persist() {
        let tmp = TempDir::new().unwrap();
        write_reference(
            tmp.path(),
            "fan",
            "pw",
            json!([{"series_animedb_id": 10, "my_status": 1, "my_last_updated": "0"}]),
        );
        let store = FileReferenceStore::new(tmp.path()).with_credentials("fan", "pw");

        let wire = WireEntry {
            episode: 3,
            status: 6,
            score: 8,
            comments: "from the other list".to_string(),
            ..WireEntry::default()
        };
        store.create_entry(2, &wire).unwrap();
        store
            .update_entry(
                10,
                &WireEntry {
                    status: 2,
                    episode: 24,
                    ..WireEntry::default()
                },
            )
            .unwrap();

        let list = store.fetch_reference_list("fan").unwrap();
        let ids: Vec<_> = list.iter().map(|r| r.series_animedb_id).collect();
        assert_eq!(ids, vec![2, 10]);
        assert_eq!(list[0].my_status, 6);
        assert_eq!(list[0].my_score, 8);
        assert_eq!(list[1].my_status, 2);
        assert_eq!(list[1].my_watched_episodes, 24);
        assert_ne!(list[1].my_last_updated, "0");

        let content = fs::read_to_string(tmp.path().join("fan.json")).unwrap();
        assert!(content.contains("from the other list"));
        assert!(!tmp.path().join("fan.json.tmp").exists());
    }

    #[test]
    fn test_write_errors() {
        let tmp = TempDir::new().unwrap();
        write_reference(
            tmp.path(),
            "fan",
            "pw",
            json!([{"series_animedb_id": 10, "my_status": 1}]),
        );
        let store = FileReferenceStore::new(tmp.path()).with_credentials("fan", "pw");

        assert_eq!(
            store.create_entry(10, &WireEntry::default()),
            Err(SourceError::AlreadyExists(10))
        );
        assert_eq!(
            store.update_entry(11, &WireEntry::default()),
            Err(SourceError::NotFound(11))
        );
        assert_eq!(
            store.create_entry(0, &WireEntry::default()),
            Err(SourceError::InvalidId(0))
        );

        let wrong = FileReferenceStore::new(tmp.path()).with_credentials("fan", "nope");
        assert_eq!(
            wrong.update_entry(10, &WireEntry::default()),
            Err(SourceError::Unauthorized("fan".to_string()))
        );

        let anonymous = FileReferenceStore::new(tmp.path());
        assert!(matches!(
            anonymous.update_entry(10, &WireEntry::default()),
            Err(SourceError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_fetch_target_list() {
        let tmp = TempDir::new().unwrap();
        let content = json!([
            {
                "status": "on_hold",
                "progress": 4,
                "rating": "3.5",
                "updatedAt": "2017-08-08T12:00:00Z",
                "media": {
                    "canonicalTitle": "Anime7",
                    "mappings": [{"externalSite": "myanimelist/anime", "externalId": "7"}]
                }
            },
            {"status": "planned"}
        ]);
        fs::write(tmp.path().join("fan.json"), content.to_string()).unwrap();

        let store = FileTargetStore::new(tmp.path());
        let list = store.fetch_target_list("fan").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].status, "on_hold");
        assert_eq!(list[0].rating.as_deref(), Some("3.5"));
        assert_eq!(
            list[0].media.as_ref().map(|m| m.canonical_title.as_str()),
            Some("Anime7")
        );
        assert!(list[1].media.is_none());

        assert!(matches!(
            store.fetch_target_list("ghost"),
            Err(SourceError::UnknownAccount(_))
        ));
    }
}
