//! Codec key handling.
//!
//! The key is deployment configuration: it arrives as 64 hex characters or
//! as a passphrase to derive from, and is never stored alongside — or
//! derived from — any ciphertext.

use crate::hash::blake2b_256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length in bytes (ChaCha20-Poly1305).
pub const KEY_LEN: usize = 32;

/// Domain-separation context for passphrase-derived keys.
const PASSPHRASE_CONTEXT: &[u8] = b"cuelock-codec-key-v1";

/// A 32-byte symmetric codec key.
///
/// Intentionally implements neither `Debug` nor `Display`; key bytes are
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CodecKey([u8; KEY_LEN]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("key must be {KEY_LEN} bytes ({0} given)")]
    WrongLength(usize),

    #[error("key is not valid hex")]
    NotHex,
}

impl CodecKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::NotHex)?;
        let arr: [u8; KEY_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::WrongLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Derive a key from a passphrase via domain-separated Blake2b.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(blake2b_256(&[PASSPHRASE_CONTEXT, passphrase.as_bytes()]))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let hex_key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
        let key = CodecKey::from_hex(hex_key).unwrap();
        assert_eq!(hex::encode(key.as_bytes()), hex_key);
    }

    #[test]
    fn hex_is_trimmed() {
        let hex_key = format!("  {}\n", "ab".repeat(32));
        assert!(CodecKey::from_hex(&hex_key).is_ok());
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(CodecKey::from_hex("zz").err(), Some(KeyError::NotHex));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            CodecKey::from_hex("aabb").err(),
            Some(KeyError::WrongLength(2))
        );
    }

    #[test]
    fn passphrase_derivation_is_deterministic() {
        let a = CodecKey::from_passphrase("open sesame");
        let b = CodecKey::from_passphrase("open sesame");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_passphrases_differ() {
        let a = CodecKey::from_passphrase("open sesame");
        let b = CodecKey::from_passphrase("open says me");
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn passphrase_key_differs_from_raw_passphrase_hash() {
        // The context prefix must separate this derivation from a bare hash
        // of the passphrase.
        let derived = CodecKey::from_passphrase("sesame");
        let bare = crate::hash::blake2b_256(&[b"sesame"]);
        assert_ne!(derived.as_bytes(), &bare);
    }
}
