//! JSON payload boxing using `XSalsa20-Poly1305`
//!
//! Boxes are NaCl `crypto_secretbox_easy` ciphertexts (16-byte Poly1305 tag
//! followed by the encrypted JSON), base64 encoded.
//!
//! The nonce is the first 24 bytes of the key itself. Existing invites were
//! produced that way, so the derivation is kept bit-for-bit. Since a key fixes
//! its nonce, a key must never box two different payloads; every invite seed
//! derives fresh keys, so single-use invites satisfy this.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use crypto_secretbox::{
    XSalsa20Poly1305,
    aead::{Aead, KeyInit, generic_array::GenericArray},
};
use serde::{Serialize, de::DeserializeOwned};
use zeroize::Zeroize;

use crate::{
    HASH_SIZE,
    error::{CryptoError, Result},
};

/// Size of the `XSalsa20` nonce taken from the key prefix
const NONCE_SIZE: usize = 24;

/// 32-byte symmetric key for payload boxes.
///
/// Payload keys are SHA-256 digests of seed material, see
/// [`Seed::private_key`](crate::Seed::private_key) and
/// [`Seed::reveal_key`](crate::Seed::reveal_key).
#[derive(Clone, PartialEq, Eq)]
pub struct BoxKey([u8; HASH_SIZE]);

impl BoxKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Standard base64 encoding, as disclosed in accept messages.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Decode a base64 key.
    ///
    /// # Errors
    ///
    /// - `MalformedId`: not base64, or not exactly 32 bytes
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let malformed = || CryptoError::MalformedId { kind: "box key", value: encoded.to_string() };

        let mut bytes = STANDARD.decode(encoded).map_err(|_| malformed())?;
        let key = <[u8; HASH_SIZE]>::try_from(bytes.as_slice()).map_err(|_| malformed());
        bytes.zeroize();

        key.map(Self)
    }

    fn nonce(&self) -> &[u8] {
        &self.0[..NONCE_SIZE]
    }
}

impl Drop for BoxKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxKey(..)")
    }
}

/// Box a JSON-serializable payload.
///
/// Returns `Ok(None)` when `data` is `None`: an omitted payload is not an
/// error, it simply produces no box.
///
/// # Errors
///
/// - `Serialize`: `data` cannot be represented as JSON
pub fn seal<T: Serialize + ?Sized>(data: Option<&T>, key: &BoxKey) -> Result<Option<String>> {
    let Some(data) = data else {
        return Ok(None);
    };

    let plaintext = serde_json::to_vec(data).map_err(CryptoError::from)?;
    let cipher = XSalsa20Poly1305::new(key.as_bytes().into());

    let Ok(ciphertext) = cipher.encrypt(GenericArray::from_slice(key.nonce()), plaintext.as_slice())
    else {
        unreachable!("XSalsa20-Poly1305 encryption cannot fail with valid inputs");
    };

    Ok(Some(STANDARD.encode(ciphertext)))
}

/// Open a boxed payload.
///
/// Returns `None` when the box is not for this key: bad base64, a failed
/// authentication tag, or plaintext that does not parse as `T`. None of these
/// are errors, since "not addressed to me" is an expected outcome. Parse
/// failures after successful authentication are logged.
pub fn open<T: DeserializeOwned>(ciphertext: &str, key: &BoxKey) -> Option<T> {
    let sealed = STANDARD.decode(ciphertext).ok()?;
    let cipher = XSalsa20Poly1305::new(key.as_bytes().into());

    let plaintext = cipher.decrypt(GenericArray::from_slice(key.nonce()), sealed.as_slice()).ok()?;

    match serde_json::from_slice(&plaintext) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, "opened payload is not valid JSON");
            None
        },
    }
}
