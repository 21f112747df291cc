//! Error types for the invite protocol.
//!
//! Two families share one enum: protocol rejections (a well-formed message
//! that breaks an invite rule) and malformed input (a message that cannot be
//! interpreted as an invite or accept at all). Both are terminal for the call;
//! the caller decides whether to drop the message or treat it as fatal.

use admit_crypto::{CryptoError, FeedId, MessageId};
use thiserror::Error;

/// Result alias for invite protocol operations.
pub type Result<T> = std::result::Result<T, InviteError>;

/// Errors produced by creating or verifying invites and accepts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InviteError {
    /// Host tried to invite its own identity
    #[error("do not create invite with own public key")]
    SelfInvite,

    /// A signature did not verify
    #[error("invalid {signer} signature")]
    InvalidSignature {
        /// Whose signature failed ("invite", "host", "redeemer")
        signer: &'static str,
    },

    /// Invite names a host other than the message author
    #[error("host {host} did not match author {author}")]
    HostMismatch {
        /// Host named in the invite content
        host: FeedId,
        /// Author of the outer message
        author: FeedId,
    },

    /// Seed holder could not open an invite payload
    #[error("could not decrypt {payload} payload")]
    DecryptionFailure {
        /// Which payload failed ("reveal" or "private")
        payload: &'static str,
    },

    /// Seed does not derive the invite identity
    #[error("seed does not match invite")]
    SeedMismatch,

    /// Accept was issued for a different invite message
    #[error("acceptance not matched to given invite: expected {expected}, got {actual}")]
    ReceiptMismatch {
        /// Receipt recomputed from the invite
        expected: MessageId,
        /// Receipt carried by the accept
        actual: MessageId,
    },

    /// Redeemer reused the invite identity instead of a new key
    #[error("invitee must use a new key, not the invite key {id}")]
    IdentityReuse {
        /// The reused invite identity
        id: FeedId,
    },

    /// Accept did not disclose a key that opens the reveal payload
    #[error("accept did not correctly reveal invite")]
    RevealFailure,

    /// Message is structurally invalid
    #[error("malformed {field}: {reason}")]
    Malformed {
        /// Field that could not be interpreted
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Cryptographic input could not be processed
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl InviteError {
    /// Returns true if a well-formed message was rejected by a protocol rule.
    ///
    /// Malformed and crypto errors mean the input could not be evaluated at
    /// all, so they are not rejections.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Malformed { .. } | Self::Crypto(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_failures_are_rejections() {
        assert!(InviteError::SelfInvite.is_rejection());
        assert!(InviteError::InvalidSignature { signer: "host" }.is_rejection());
        assert!(InviteError::DecryptionFailure { payload: "reveal" }.is_rejection());
        assert!(InviteError::SeedMismatch.is_rejection());
        assert!(InviteError::RevealFailure.is_rejection());
    }

    #[test]
    fn malformed_input_is_not_a_rejection() {
        assert!(
            !InviteError::Malformed { field: "content", reason: "missing".to_string() }
                .is_rejection()
        );
        assert!(!InviteError::Crypto(CryptoError::InvalidSeedLength { actual: 3 }).is_rejection());
    }

    #[test]
    fn messages_describe_the_failure() {
        assert_eq!(
            InviteError::InvalidSignature { signer: "host" }.to_string(),
            "invalid host signature"
        );
        assert_eq!(
            InviteError::DecryptionFailure { payload: "private" }.to_string(),
            "could not decrypt private payload"
        );
    }
}
