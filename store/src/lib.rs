//! Abstract storage traits for cuelock.
//!
//! Every storage backend (JSON file, in-memory for testing) implements
//! these traits. The rest of the codebase depends only on the traits.

pub mod credential;
pub mod error;
pub mod notes;

pub use credential::CredentialStore;
pub use error::StoreError;
pub use notes::{Note, NoteStore};
