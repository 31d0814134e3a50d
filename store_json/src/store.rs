//! File-backed store implementation.

use crate::document::StoreDocument;
use crate::error::JsonStoreError;
use async_trait::async_trait;
use cuelock_store::{CredentialStore, Note, NoteStore, StoreError};
use cuelock_types::Username;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Store holding the whole document in one JSON file at `path`.
///
/// Every operation reloads the file, mutates the document and rewrites it,
/// serialized through one async mutex. Writes go to a sibling temp file
/// followed by a rename, so a crash mid-write leaves the previous document
/// intact. The file is the source of truth; nothing is cached between
/// operations, matching the remote-store model the traits were written for.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, treating a missing file as an empty store.
    fn load(&self) -> Result<StoreDocument, JsonStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), JsonStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(doc)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn get_credential(&self, username: &Username) -> Result<String, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.load()?;
        doc.users
            .get(username.as_str())
            .and_then(|record| record.credential.clone())
            .ok_or_else(|| StoreError::NotFound(format!("credential for {username}")))
    }

    async fn put_credential(&self, username: &Username, blob: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load()?;
        doc.users
            .entry(username.as_str().to_string())
            .or_default()
            .credential = Some(blob.to_string());
        self.save(&doc)?;
        debug!(user = %username, "stored credential blob");
        Ok(())
    }
}

#[async_trait]
impl NoteStore for JsonFileStore {
    async fn append_note(&self, username: &Username, text: &str) -> Result<Note, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load()?;
        let record = doc.users.entry(username.as_str().to_string()).or_default();
        let id = record.next_note_id();
        record.notes.insert(id.clone(), text.to_string());
        self.save(&doc)?;
        debug!(user = %username, note = %id, "appended note");
        Ok(Note {
            id,
            text: text.to_string(),
        })
    }

    async fn list_notes(&self, username: &Username) -> Result<Vec<Note>, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.load()?;
        Ok(doc
            .users
            .get(username.as_str())
            .map(|record| record.notes_in_order())
            .unwrap_or_default()
            .into_iter()
            .map(|(id, text)| Note { id, text })
            .collect())
    }
}
