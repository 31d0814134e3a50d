//! Fundamental types for the cuelock authentication engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: cue labels, usernames, the fixed vocabulary with its per-session
//! presentation order, and the decrypted credential form.

pub mod credential;
pub mod label;
pub mod narrator;
pub mod username;
pub mod vocabulary;

pub use credential::Credential;
pub use label::CueLabel;
pub use narrator::{Narrator, SilentNarrator};
pub use username::{InvalidUsername, Username};
pub use vocabulary::{
    PresentationOrder, Vocabulary, VocabularyError, MIN_LABELS, REFERENCE_LABELS,
};
