//! Seeds, invite keypairs and feed identities
//!
//! # Security Properties
//!
//! - Determinism: the same seed always produces the same keypair
//! - Seed and signing key material is zeroized on drop
//! - Feed ids carry only public key bytes

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{
    error::{CryptoError, Result},
    hash::hash,
    secret_box::BoxKey,
    signing::Signature,
};

/// Size of an invite seed in bytes
pub const SEED_SIZE: usize = 32;

/// Size of an Ed25519 public key in bytes
const PUBLIC_KEY_SIZE: usize = 32;

const FEED_SIGIL: char = '@';
const FEED_SUFFIX: &str = ".ed25519";

/// Secret seed from which an invite's keypair and payload keys are derived.
///
/// Whoever holds the seed can act as the invite identity, so it is the
/// capability being handed out.
#[derive(Clone)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Wrap 32 seed bytes.
    pub fn from_bytes(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a seed out of a slice.
    ///
    /// # Errors
    ///
    /// - `InvalidSeedLength`: slice is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let seed: [u8; SEED_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSeedLength { actual: bytes.len() })?;
        Ok(Self(seed))
    }

    /// Raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }

    /// Derive the invite keypair.
    pub fn keypair(&self) -> Keypair {
        Keypair::from_seed(self)
    }

    /// Key for the private payload: `hash(seed)`.
    pub fn private_key(&self) -> BoxKey {
        BoxKey::from_bytes(hash(self.0))
    }

    /// Key for the reveal payload: `hash(hash(seed))`.
    ///
    /// This is the key an accept discloses, so it must never unlock the
    /// private payload.
    pub fn reveal_key(&self) -> BoxKey {
        BoxKey::from_bytes(hash(hash(self.0)))
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Ed25519 keypair with its derived feed id.
pub struct Keypair {
    signing_key: SigningKey,
    id: FeedId,
}

impl Keypair {
    /// Deterministically derive a keypair, using the seed as the Ed25519
    /// secret key.
    pub fn from_seed(seed: &Seed) -> Self {
        let signing_key = SigningKey::from_bytes(seed.as_bytes());
        let id = FeedId::from(signing_key.verifying_key());
        Self { signing_key, id }
    }

    /// Public identity of this keypair.
    pub fn id(&self) -> &FeedId {
        &self.id
    }

    /// Sign raw bytes.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from(self.signing_key.sign(message))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Public identity: `@<base64 ed25519 public key>.ed25519`.
///
/// Parsing checks the format only; whether the bytes are a valid curve point
/// is decided at verification time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FeedId([u8; PUBLIC_KEY_SIZE]);

impl FeedId {
    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Verify an Ed25519 signature made by this identity.
    ///
    /// Returns `false` for invalid public keys as well as bad signatures.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        VerifyingKey::from_bytes(&self.0)
            .is_ok_and(|key| key.verify_strict(message, signature.as_inner()).is_ok())
    }
}

impl From<VerifyingKey> for FeedId {
    fn from(key: VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FEED_SIGIL}{}{FEED_SUFFIX}", STANDARD.encode(self.0))
    }
}

impl fmt::Debug for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedId({self})")
    }
}

impl FromStr for FeedId {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || CryptoError::MalformedId { kind: "feed", value: s.to_string() };

        let encoded = s
            .strip_prefix(FEED_SIGIL)
            .and_then(|rest| rest.strip_suffix(FEED_SUFFIX))
            .ok_or_else(malformed)?;
        let bytes = STANDARD.decode(encoded).map_err(|_| malformed())?;
        let key: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| malformed())?;

        Ok(Self(key))
    }
}

impl TryFrom<String> for FeedId {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FeedId> for String {
    fn from(id: FeedId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_is_deterministic() {
        let seed = Seed::from_bytes([7u8; SEED_SIZE]);

        assert_eq!(seed.keypair().id(), seed.keypair().id());
        assert_eq!(Keypair::from_seed(&seed).id(), seed.keypair().id());
    }

    #[test]
    fn different_seeds_produce_different_ids() {
        let a = Seed::from_bytes([1u8; SEED_SIZE]).keypair();
        let b = Seed::from_bytes([2u8; SEED_SIZE]).keypair();

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rfc8032_public_key() {
        let secret =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap();
        let keys = Seed::from_slice(&secret).unwrap().keypair();

        assert_eq!(
            hex::encode(keys.id().as_bytes()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn seed_from_slice_rejects_wrong_length() {
        assert_eq!(
            Seed::from_slice(&[0u8; 31]).unwrap_err(),
            CryptoError::InvalidSeedLength { actual: 31 }
        );
        assert!(Seed::from_slice(&[0u8; 33]).is_err());
        assert!(Seed::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn payload_keys_are_distinct_derivation_depths() {
        let seed = Seed::from_bytes([0u8; SEED_SIZE]);

        assert_eq!(seed.private_key().as_bytes(), &hash(seed.as_bytes()));
        assert_eq!(seed.reveal_key().as_bytes(), &hash(hash(seed.as_bytes())));
        assert_ne!(seed.private_key().as_bytes(), seed.reveal_key().as_bytes());
    }

    #[test]
    fn feed_id_format() {
        let id = Seed::from_bytes([0u8; SEED_SIZE]).keypair().id().to_string();

        assert!(id.starts_with('@'));
        assert!(id.ends_with(".ed25519"));
        // 32 bytes of base64 with padding
        assert_eq!(id.len(), 1 + 44 + ".ed25519".len());
    }

    #[test]
    fn feed_id_parse_roundtrip() {
        let id = *Seed::from_bytes([3u8; SEED_SIZE]).keypair().id();
        let parsed: FeedId = id.to_string().parse().unwrap();

        assert_eq!(parsed, id);
    }

    #[test]
    fn feed_id_rejects_malformed_input() {
        let valid = Seed::from_bytes([3u8; SEED_SIZE]).keypair().id().to_string();

        for bad in [
            "",
            "@host",
            valid.trim_start_matches('@'),
            valid.trim_end_matches(".ed25519"),
            "@AAAA.ed25519",
            "@!!!!.ed25519",
        ] {
            assert!(
                matches!(bad.parse::<FeedId>(), Err(CryptoError::MalformedId { kind: "feed", .. })),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn feed_id_serializes_as_string() {
        let id = *Seed::from_bytes([4u8; SEED_SIZE]).keypair().id();
        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, serde_json::Value::String(id.to_string()));
        assert_eq!(serde_json::from_value::<FeedId>(json).unwrap(), id);
        assert!(serde_json::from_value::<FeedId>(serde_json::json!("@host")).is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let seed = Seed::from_bytes([0xAB; SEED_SIZE]);

        assert_eq!(format!("{seed:?}"), "Seed(..)");
        assert!(!format!("{:?}", seed.keypair()).contains("signing_key"));
    }
}
