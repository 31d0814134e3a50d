//! Nullable store — thread-safe in-memory storage for testing.

use async_trait::async_trait;
use cuelock_store::{CredentialStore, Note, NoteStore, StoreError};
use cuelock_types::Username;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory credential + note store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
///
/// Failures are programmable: [`NullCredentialStore::fail_next`] makes the
/// next operation return [`StoreError::Unavailable`], which is how tests
/// exercise the transient-outage paths without a flaky backend.
pub struct NullCredentialStore {
    credentials: Mutex<HashMap<String, String>>,
    notes: Mutex<HashMap<String, Vec<String>>>,
    fail_next: Mutex<Option<String>>,
}

impl NullCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: Mutex::new(HashMap::new()),
            notes: Mutex::new(HashMap::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Arm a one-shot failure: the next store operation (any of them)
    /// returns `StoreError::Unavailable(reason)` and disarms the fault.
    pub fn fail_next(&self, reason: &str) {
        *self.fail_next.lock().unwrap() = Some(reason.to_string());
    }

    /// Seed a credential blob directly, bypassing the failure gate.
    pub fn seed_credential(&self, username: &Username, blob: &str) {
        self.credentials
            .lock()
            .unwrap()
            .insert(username.as_str().to_string(), blob.to_string());
    }

    /// Raw stored blob, for byte-level assertions.
    pub fn stored_blob(&self, username: &Username) -> Option<String> {
        self.credentials.lock().unwrap().get(username.as_str()).cloned()
    }

    fn trip_failure(&self) -> Result<(), StoreError> {
        match self.fail_next.lock().unwrap().take() {
            Some(reason) => Err(StoreError::Unavailable(reason)),
            None => Ok(()),
        }
    }
}

impl Default for NullCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for NullCredentialStore {
    async fn get_credential(&self, username: &Username) -> Result<String, StoreError> {
        self.trip_failure()?;
        self.credentials
            .lock()
            .unwrap()
            .get(username.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    async fn put_credential(&self, username: &Username, blob: &str) -> Result<(), StoreError> {
        self.trip_failure()?;
        self.credentials
            .lock()
            .unwrap()
            .insert(username.as_str().to_string(), blob.to_string());
        Ok(())
    }

    async fn credential_exists(&self, username: &Username) -> Result<bool, StoreError> {
        self.trip_failure()?;
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .contains_key(username.as_str()))
    }
}

#[async_trait]
impl NoteStore for NullCredentialStore {
    async fn append_note(&self, username: &Username, text: &str) -> Result<Note, StoreError> {
        self.trip_failure()?;
        let mut notes = self.notes.lock().unwrap();
        let list = notes.entry(username.as_str().to_string()).or_default();
        let id = list.len().to_string();
        list.push(text.to_string());
        Ok(Note {
            id,
            text: text.to_string(),
        })
    }

    async fn list_notes(&self, username: &Username) -> Result<Vec<Note>, StoreError> {
        self.trip_failure()?;
        Ok(self
            .notes
            .lock()
            .unwrap()
            .get(username.as_str())
            .map(|list| {
                list.iter()
                    .enumerate()
                    .map(|(i, text)| Note {
                        id: i.to_string(),
                        text: text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
