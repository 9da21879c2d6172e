//! Source held entirely in memory

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ReferenceSource, SourceError, TargetSource, apply_wire, new_reference_entry};
use crate::entry::EntryId;
use crate::normalize::{RawReferenceEntry, RawTargetEntry, WireEntry};

/// A write recorded by [`InMemorySource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// `create_entry` succeeded
    Create(EntryId, WireEntry),
    /// `update_entry` succeeded
    Update(EntryId, WireEntry),
}

#[derive(Debug, Default)]
struct State {
    reference: BTreeMap<String, Vec<RawReferenceEntry>>,
    target: BTreeMap<String, Vec<RawTargetEntry>>,
    passwords: BTreeMap<String, String>,
    failures: BTreeMap<EntryId, SourceError>,
    mutations: Vec<Mutation>,
}

/// Reference and target source backed by in-memory lists.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the engine owns another. Writes go to the list of the account bound with
/// [`with_credentials`](Self::with_credentials).
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    state: Arc<Mutex<State>>,
    credentials: Option<(String, String)>,
}

impl InMemorySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the account that receives writes
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the reference list of `account`
    pub fn insert_reference(&self, account: &str, entries: Vec<RawReferenceEntry>) {
        self.state().reference.insert(account.to_string(), entries);
    }

    /// Replace the target list of `account`
    pub fn insert_target(&self, account: &str, entries: Vec<RawTargetEntry>) {
        self.state().target.insert(account.to_string(), entries);
    }

    /// Accept `password` for `account`
    pub fn set_password(&self, account: &str, password: &str) {
        self.state()
            .passwords
            .insert(account.to_string(), password.to_string());
    }

    /// Make every write for `id` fail with `error`
    pub fn fail_on(&self, id: EntryId, error: SourceError) {
        self.state().failures.insert(id, error);
    }

    /// Writes that succeeded so far, in call order
    #[must_use]
    pub fn mutations(&self) -> Vec<Mutation> {
        self.state().mutations.clone()
    }

    fn bound_account(&self, state: &State) -> Result<String, SourceError> {
        let Some((user, password)) = &self.credentials else {
            return Err(SourceError::Unauthorized(String::new()));
        };
        match state.passwords.get(user) {
            Some(expected) if expected == password => Ok(user.clone()),
            _ => Err(SourceError::Unauthorized(user.clone())),
        }
    }
}

impl ReferenceSource for InMemorySource {
    fn fetch_reference_list(&self, account: &str) -> Result<Vec<RawReferenceEntry>, SourceError> {
        self.state()
            .reference
            .get(account)
            .cloned()
            .ok_or_else(|| SourceError::UnknownAccount(account.to_string()))
    }

    fn create_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        let mut state = self.state();
        if let Some(error) = state.failures.get(&id) {
            return Err(error.clone());
        }
        if id == 0 {
            return Err(SourceError::InvalidId(id));
        }
        let account = self.bound_account(&state)?;

        let list = state.reference.entry(account).or_default();
        if list.iter().any(|raw| raw.series_animedb_id == id) {
            return Err(SourceError::AlreadyExists(id));
        }
        list.push(new_reference_entry(id, entry));
        list.sort_by_key(|raw| raw.series_animedb_id);

        state.mutations.push(Mutation::Create(id, entry.clone()));
        Ok(())
    }

    fn update_entry(&self, id: EntryId, entry: &WireEntry) -> Result<(), SourceError> {
        let mut state = self.state();
        if let Some(error) = state.failures.get(&id) {
            return Err(error.clone());
        }
        if id == 0 {
            return Err(SourceError::InvalidId(id));
        }
        let account = self.bound_account(&state)?;

        let raw = state
            .reference
            .get_mut(&account)
            .and_then(|list| list.iter_mut().find(|raw| raw.series_animedb_id == id))
            .ok_or(SourceError::NotFound(id))?;
        apply_wire(raw, entry);

        state.mutations.push(Mutation::Update(id, entry.clone()));
        Ok(())
    }

    fn verify_credentials(&self, user: &str, password: &str) -> Result<(), SourceError> {
        match self.state().passwords.get(user) {
            Some(expected) if expected == password => Ok(()),
            _ => Err(SourceError::Unauthorized(user.to_string())),
        }
    }
}

impl TargetSource for InMemorySource {
    fn fetch_target_list(&self, account: &str) -> Result<Vec<RawTargetEntry>, SourceError> {
        self.state()
            .target
            .get(account)
            .cloned()
            .ok_or_else(|| SourceError::UnknownAccount(account.to_string()))
    }
}
