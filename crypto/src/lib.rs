//! Cryptographic primitives for cuelock.
//!
//! - **ChaCha20-Poly1305** for credential encryption (deterministic nonce,
//!   so equal plaintexts give equal blobs)
//! - **Blake2b** for hashing (nonce derivation, passphrase-to-key stretching)

pub mod codec;
pub mod hash;
pub mod key;

pub use codec::{CodecError, CredentialCodec, NONCE_LEN};
pub use hash::blake2b_256;
pub use key::{CodecKey, KeyError, KEY_LEN};
