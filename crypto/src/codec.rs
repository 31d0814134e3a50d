//! Credential codec — deterministic authenticated encryption of the
//! credential plaintext.
//!
//! Uses ChaCha20-Poly1305 AEAD. The nonce is derived deterministically from
//! the key and the plaintext (first 12 bytes of Blake2b-256(key ‖ plaintext))
//! and prepended to the ciphertext, so equal plaintexts under the same key
//! produce equal blobs — the store holds one blob per user and overwrites are
//! byte-comparable. The blob is lowercase hex, a plain string the store can
//! hold without any framing.
//!
//! Determinism leaks plaintext *equality* between users, nothing more; with a
//! two-label credential space that is an accepted property of the scheme, not
//! a weakness the codec can fix.

use crate::hash::blake2b_256;
use crate::key::CodecKey;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use thiserror::Error;

/// Nonce length in bytes (ChaCha20-Poly1305).
pub const NONCE_LEN: usize = 12;

/// Errors from [`CredentialCodec::decrypt`].
///
/// Every variant means the same thing to a caller: the stored credential is
/// unreadable. The split exists for logs, not for branching — malformed hex
/// cannot be distinguished from tampering with any confidence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("ciphertext is not valid hex")]
    NotHex,

    #[error("ciphertext truncated: {0} bytes, shorter than the {NONCE_LEN}-byte nonce")]
    Truncated(usize),

    #[error("decryption failed: authentication check failed")]
    AuthFailed,

    #[error("decrypted credential is not valid UTF-8")]
    InvalidUtf8,
}

/// Reversible transform between credential plaintext and the stored blob.
///
/// Deterministic under a fixed process-wide key; no side effects.
#[derive(Clone)]
pub struct CredentialCodec {
    key: CodecKey,
}

impl CredentialCodec {
    pub fn new(key: CodecKey) -> Self {
        Self { key }
    }

    /// Encrypt plaintext into the hex blob format.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let cipher = ChaCha20Poly1305::new_from_slice(self.key.as_bytes())
            .expect("valid key length");
        let nonce = self.derive_nonce(plaintext);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .expect("encryption should not fail");

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        hex::encode(blob)
    }

    /// Decrypt a stored blob back to plaintext.
    pub fn decrypt(&self, blob: &str) -> Result<String, CodecError> {
        let bytes = hex::decode(blob.trim()).map_err(|_| CodecError::NotHex)?;
        if bytes.len() < NONCE_LEN {
            return Err(CodecError::Truncated(bytes.len()));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);

        let cipher = ChaCha20Poly1305::new_from_slice(self.key.as_bytes())
            .expect("valid key length");
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(&Nonce::from(nonce), ciphertext)
            .map_err(|_| CodecError::AuthFailed)?;
        String::from_utf8(plaintext).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Nonce = first 12 bytes of Blake2b-256(key ‖ plaintext). The key
    /// prefix keeps the nonce unpredictable to anyone who only sees blobs.
    fn derive_nonce(&self, plaintext: &str) -> Nonce {
        let digest = blake2b_256(&[self.key.as_bytes(), plaintext.as_bytes()]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&digest[..NONCE_LEN]);
        Nonce::from(nonce)
    }
}
