//! Note storage trait.

use crate::StoreError;
use async_trait::async_trait;
use cuelock_types::Username;
use serde::{Deserialize, Serialize};

/// A free-text note attached to a user, readable only after login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Backend-assigned identifier, unique within the user's note list.
    pub id: String,
    pub text: String,
}

/// Trait for per-user note storage.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Append a note to `username`'s list and return it with its new id.
    async fn append_note(&self, username: &Username, text: &str) -> Result<Note, StoreError>;

    /// List notes for `username` in insertion order. A user with no notes
    /// yields an empty list, not [`StoreError::NotFound`].
    async fn list_notes(&self, username: &Username) -> Result<Vec<Note>, StoreError>;
}
