//! JSON file storage backend for cuelock.
//!
//! Implements the storage traits from `cuelock-store` over a single JSON
//! document on disk, shaped like the original deployment's database tree
//! (`users/<name>/AudioLogin`, `users/<name>/notes/<id>`). Intended for
//! single-machine use; a hosted deployment would implement the same traits
//! against its database service.

pub mod document;
pub mod error;
pub mod store;

pub use document::{StoreDocument, UserRecord};
pub use error::JsonStoreError;
pub use store::JsonFileStore;
