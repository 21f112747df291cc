//! Admit Cryptographic Primitives
//!
//! Cryptographic building blocks for single-use invite capabilities. Pure
//! functions with deterministic outputs: the same seed always yields the same
//! identity, the same keys, and the same ciphertexts.
//!
//! # Key Derivation
//!
//! A 32-byte seed is the only secret an invite carries. Everything else is
//! derived from it:
//!
//! ```text
//! Seed ──────────────► Ed25519 keypair (invite identity)
//!  │
//!  ▼
//! SHA-256 ───────────► private payload key
//!  │
//!  ▼
//! SHA-256 ───────────► reveal payload key (disclosed on accept)
//! ```
//!
//! The reveal key sits one hash deeper than the private key, so disclosing it
//! never exposes the private payload.
//!
//! # Wire Formats
//!
//! - Identities: `@<base64 public key>.ed25519`
//! - Signatures: `<base64 signature>.sig.ed25519`
//! - Message ids: `%<base64 sha256>.sha256`
//! - Boxed payloads: base64 of an XSalsa20-Poly1305 secret box whose nonce is
//!   the first 24 bytes of its key
//!
//! # Security
//!
//! Domain Separation:
//! - Objects signed under a domain secret are signed over
//!   HMAC-SHA512-256(secret, canonical JSON), never over the JSON itself
//! - A domain-bound signature cannot be replayed as an ordinary message
//!   signature and vice versa
//!
//! Nonce Reuse:
//! - Secret box nonces are derived from the key, so each key must box at most
//!   one distinct payload. Invite keys are single-use, which upholds this.
//!
//! Authenticity:
//! - Failed authentication tag -> payload treated as absent
//! - Signatures verified with strict Ed25519 rules

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod canonical;
pub mod error;
pub mod hash;
pub mod keys;
pub mod secret_box;
pub mod signing;

pub use canonical::{JsonObject, MessageId, message_id, to_canonical_json};
pub use error::{CryptoError, Result};
pub use hash::{HASH_SIZE, hash};
pub use keys::{FeedId, Keypair, SEED_SIZE, Seed};
pub use secret_box::{BoxKey, open, seal};
pub use signing::{Signature, sign_object, verify_object};
