//! Nullable narrator — record announcements without speaking them.

use cuelock_types::Narrator;
use std::sync::{Arc, Mutex};

/// A test narrator that records every announcement.
///
/// Clones share the same transcript, so one clone can ride along inside an
/// attempt task while the test keeps another for assertions.
#[derive(Clone, Default)]
pub struct NullNarrator {
    announcements: Arc<Mutex<Vec<String>>>,
}

impl NullNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All announcements so far (for assertions).
    pub fn announcements(&self) -> Vec<String> {
        self.announcements.lock().unwrap().clone()
    }

    /// The most recent announcement, if any.
    pub fn last(&self) -> Option<String> {
        self.announcements.lock().unwrap().last().cloned()
    }

    /// Clear the transcript.
    pub fn reset(&self) {
        self.announcements.lock().unwrap().clear();
    }
}

impl Narrator for NullNarrator {
    fn announce(&self, text: &str) {
        self.announcements.lock().unwrap().push(text.to_string());
    }
}
