//! Error types for the cryptographic layer.
//!
//! Verification never errors: a bad signature or an undecryptable box is an
//! expected outcome and is reported as `false` or `None`. These errors cover
//! input that cannot be interpreted at all.

use thiserror::Error;

/// Result alias for cryptographic operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors from parsing or producing cryptographic material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Seed was not exactly 32 bytes
    #[error("invalid seed length: expected 32 bytes, got {actual}")]
    InvalidSeedLength {
        /// Length that was supplied
        actual: usize,
    },

    /// Identifier did not match its sigil/suffix/base64 format
    #[error("malformed {kind} id: {value:?}")]
    MalformedId {
        /// Kind of identifier (e.g. "feed", "box key")
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Signature string could not be decoded
    #[error("malformed signature: {reason}")]
    MalformedSignature {
        /// Why decoding failed
        reason: String,
    },

    /// Payload could not be serialized to JSON
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
