//! Cue label newtype.
//!
//! A label names one presentable cue (e.g. an animal sound). Labels cross
//! several boundaries — configuration, narration, the encrypted credential,
//! user selection — and every comparison between them must happen under the
//! same normalization. The constructor enforces it once: trim, then
//! lowercase. There is no other way to build a `CueLabel`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized cue label.
///
/// Equality is exact string equality over the normalized form, so
/// `CueLabel::new(" Cat ") == CueLabel::new("cat")`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CueLabel(String);

impl CueLabel {
    /// Create a label, normalizing the raw text (trim + lowercase).
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// The normalized label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the normalized form is empty (blank or whitespace-only input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CueLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CueLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CueLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
