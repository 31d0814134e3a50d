//! Credential storage trait.

use crate::StoreError;
use async_trait::async_trait;
use cuelock_types::Username;

/// Trait for credential storage operations.
///
/// The store holds one encrypted blob per username and never sees label
/// plaintext. Backends are free to be remote, so every operation is async
/// and every operation can fail with [`StoreError::Unavailable`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the stored blob for `username`.
    ///
    /// Returns [`StoreError::NotFound`] when the user has no credential,
    /// which callers must keep distinct from transient backend failures.
    async fn get_credential(&self, username: &Username) -> Result<String, StoreError>;

    /// Store or overwrite the blob for `username`.
    async fn put_credential(&self, username: &Username, blob: &str) -> Result<(), StoreError>;

    /// True when `username` already has a stored credential.
    async fn credential_exists(&self, username: &Username) -> Result<bool, StoreError> {
        match self.get_credential(username).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
