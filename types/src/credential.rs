//! The registered credential in its decrypted, in-memory form.
//!
//! At rest a credential exists only as codec ciphertext; in memory, briefly,
//! as the ordered label sequence this type carries. The plaintext wire form
//! is the comma-joined label string (`"cow,sheep"`) — that exact string is
//! what the codec encrypts at registration and what decryption must yield at
//! login.

use crate::label::CueLabel;
use crate::username::Username;

/// An ordered cue-label credential belonging to one username.
///
/// Order is semantically significant: `["cow","sheep"]` and
/// `["sheep","cow"]` are different credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    username: Username,
    labels: Vec<CueLabel>,
}

impl Credential {
    pub fn new(username: Username, labels: Vec<CueLabel>) -> Self {
        Self { username, labels }
    }

    /// Rebuild a credential from decrypted plaintext.
    ///
    /// Splits on `,` and normalizes each segment, so a blob stored by an
    /// older client with stray spacing (`"Cow, Sheep"`) still compares
    /// correctly.
    pub fn from_plaintext(username: Username, plaintext: &str) -> Self {
        let labels = plaintext.split(',').map(CueLabel::new).collect();
        Self { username, labels }
    }

    /// The comma-joined plaintext handed to the codec.
    pub fn plaintext(&self) -> String {
        self.labels
            .iter()
            .map(CueLabel::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn labels(&self) -> &[CueLabel] {
        &self.labels
    }
}
