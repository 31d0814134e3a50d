//! Username newtype.
//!
//! Usernames key the hierarchical credential store (`users/<name>/<field>`),
//! so in addition to being non-empty they must avoid the characters such
//! stores reserve for path syntax.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters that cannot appear in a store key path segment.
const FORBIDDEN: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// A validated, trimmed username.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Username(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidUsername {
    #[error("username is empty")]
    Empty,

    #[error("username contains forbidden character '{0}'")]
    ForbiddenChar(char),
}

impl Username {
    /// Validate a raw username: trimmed, non-empty, store-key safe.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidUsername> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidUsername::Empty);
        }
        if let Some(bad) = trimmed.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(InvalidUsername::ForbiddenChar(bad));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = InvalidUsername;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = InvalidUsername;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
