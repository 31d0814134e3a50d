//! Blake2b derivation helper.
//!
//! Both codec derivations — passphrase to key material, and the per-blob
//! nonce — hash a fixed-length context or key followed by variable input, so
//! the multi-part form is the only one the crate needs.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// 256-bit Blake2b over the concatenation of `parts` (without allocating the
/// concatenation).
///
/// Part boundaries do not feed the hash: callers separate domains with a
/// fixed-length leading part (a context literal or the 32-byte key), never by
/// relying on where one slice ends.
pub fn blake2b_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&digest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(blake2b_256(&[b"cuelock"]), blake2b_256(&[b"cuelock"]));
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(blake2b_256(&[b"cat"]), blake2b_256(&[b"cow"]));
    }

    #[test]
    fn empty_input_is_not_zero() {
        assert_ne!(blake2b_256(&[]), [0u8; 32]);
    }

    #[test]
    fn parts_concatenate() {
        // Boundaries are invisible; domain separation comes from the
        // fixed-length leading part.
        assert_eq!(blake2b_256(&[b"cow", b"sheep"]), blake2b_256(&[b"cowsheep"]));
    }
}
