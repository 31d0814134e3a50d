//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern: the external dependencies
//! of an authentication attempt (storage, narration) sit behind traits, and
//! this crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (including failure injection)
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod narrator;
pub mod store;

pub use narrator::NullNarrator;
pub use store::NullCredentialStore;
