//! Object signing with optional domain separation
//!
//! A signed object is a JSON object whose last field is `signature`. The
//! signature covers the canonical JSON of every other field, in order.
//!
//! Ordinary signatures sign that JSON directly. Domain-bound signatures sign
//! `HMAC-SHA512-256(domain, json)` instead, which scopes them to a single
//! protocol: a domain-bound signature never verifies as an ordinary one, and
//! an ordinary signature never verifies under a domain.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;

use crate::{
    HASH_SIZE,
    canonical::{JsonObject, to_canonical_json},
    error::{CryptoError, Result},
    keys::{FeedId, Keypair},
};

type HmacSha512 = Hmac<Sha512>;

/// Field that carries an object's signature
const SIGNATURE_FIELD: &str = "signature";

const SIGNATURE_SUFFIX: &str = ".sig.ed25519";

/// HMAC-SHA512-256 output size
const AUTH_SIZE: usize = 32;

/// Ed25519 signature in wire form: `<base64>.sig.ed25519`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    pub(crate) fn as_inner(&self) -> &ed25519_dalek::Signature {
        &self.0
    }

    /// Raw 64 signature bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }
}

impl From<ed25519_dalek::Signature> for Signature {
    fn from(signature: ed25519_dalek::Signature) -> Self {
        Self(signature)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SIGNATURE_SUFFIX}", STANDARD.encode(self.0.to_bytes()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        let encoded = s.strip_suffix(SIGNATURE_SUFFIX).ok_or_else(|| {
            CryptoError::MalformedSignature { reason: format!("missing {SIGNATURE_SUFFIX} suffix") }
        })?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedSignature { reason: e.to_string() })?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            CryptoError::MalformedSignature {
                reason: format!("expected 64 bytes, got {}", bytes.len()),
            }
        })?;

        Ok(Self(ed25519_dalek::Signature::from_bytes(&bytes)))
    }
}

/// Sign an object, appending `signature` as its last field.
///
/// With `domain` set, the signature is domain-bound (see module docs). Any
/// existing `signature` field is dropped before signing.
pub fn sign_object(
    keys: &Keypair,
    domain: Option<&[u8; HASH_SIZE]>,
    mut object: JsonObject,
) -> JsonObject {
    object.shift_remove(SIGNATURE_FIELD);

    let signature = keys.sign(&signing_bytes(domain, &object));
    object.insert(SIGNATURE_FIELD.to_string(), Value::String(signature.to_string()));

    object
}

/// Verify that `signer` signed `object` under `domain`.
///
/// A missing or malformed `signature` field is a failed verification, not an
/// error.
pub fn verify_object(
    signer: &FeedId,
    domain: Option<&[u8; HASH_SIZE]>,
    object: &JsonObject,
) -> bool {
    let Some(Value::String(encoded)) = object.get(SIGNATURE_FIELD) else {
        return false;
    };
    let Ok(signature) = encoded.parse::<Signature>() else {
        return false;
    };

    let mut unsigned = object.clone();
    unsigned.shift_remove(SIGNATURE_FIELD);

    signer.verify(&signing_bytes(domain, &unsigned), &signature)
}

/// Bytes covered by a signature: canonical JSON, optionally passed through
/// HMAC-SHA512-256 keyed by the domain secret.
fn signing_bytes(domain: Option<&[u8; HASH_SIZE]>, unsigned: &JsonObject) -> Vec<u8> {
    let json = to_canonical_json(&Value::Object(unsigned.clone()));

    match domain {
        None => json.into_bytes(),
        Some(secret) => authenticate(secret, json.as_bytes()).to_vec(),
    }
}

/// HMAC-SHA512 truncated to 256 bits.
fn authenticate(key: &[u8; HASH_SIZE], data: &[u8]) -> [u8; AUTH_SIZE] {
    let Ok(mut mac) = HmacSha512::new_from_slice(key) else {
        unreachable!("HMAC-SHA512 accepts any key size");
    };
    mac.update(data);
    let tag = mac.finalize().into_bytes();

    let mut out = [0u8; AUTH_SIZE];
    out.copy_from_slice(&tag[..AUTH_SIZE]);
    out
}
