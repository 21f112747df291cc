//! Content hashing with SHA-256

use sha2::{Digest, Sha256};

/// Size of a SHA-256 digest in bytes
pub const HASH_SIZE: usize = 32;

/// SHA-256 digest of text (as UTF-8) or raw bytes.
///
/// Composes: `hash(hash(seed))` hashes the first digest's raw bytes.
pub fn hash(input: impl AsRef<[u8]>) -> [u8; HASH_SIZE] {
    Sha256::digest(input.as_ref()).into()
}
