//! Property-based tests for the cryptographic primitives
//!
//! Boxes open only under the key that sealed them, identities are a pure
//! function of the seed, and object signatures bind every field and the
//! signing domain.

use admit_crypto::{
    BoxKey, FeedId, JsonObject, MessageId, Seed, Signature, hash, message_id, open, seal,
    sign_object, verify_object,
};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for flat JSON objects with string and integer fields
fn arbitrary_object() -> impl Strategy<Value = JsonObject> {
    prop::collection::btree_map(
        "[a-z]{1,8}",
        prop_oneof!["[ -~]{0,32}".prop_map(Value::from), any::<i64>().prop_map(Value::from)],
        0..6,
    )
    .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_seal_open_roundtrip(
        key in any::<[u8; 32]>(),
        text in ".{0,256}",
        number in any::<i64>(),
    ) {
        let key = BoxKey::from_bytes(key);
        let payload = json!({"text": text, "number": number});

        let sealed = seal(Some(&payload), &key).unwrap().unwrap();
        let opened: Value = open(&sealed, &key).unwrap();

        prop_assert_eq!(opened, payload);
    }

    #[test]
    fn prop_other_key_opens_nothing(
        key1 in any::<[u8; 32]>(),
        key2 in any::<[u8; 32]>(),
        text in ".{0,64}",
    ) {
        prop_assume!(key1 != key2);
        let sealed = seal(Some(&text), &BoxKey::from_bytes(key1)).unwrap().unwrap();

        prop_assert_eq!(open::<String>(&sealed, &BoxKey::from_bytes(key2)), None);
    }

    #[test]
    fn prop_keypair_is_deterministic(seed in any::<[u8; 32]>()) {
        let first = Seed::from_bytes(seed).keypair();
        let second = Seed::from_bytes(seed).keypair();

        prop_assert_eq!(first.id(), second.id());
    }

    #[test]
    fn prop_payload_keys_are_distinct(seed in any::<[u8; 32]>()) {
        let seed = Seed::from_bytes(seed);

        let private_key = seed.private_key();
        let reveal_key = seed.reveal_key();
        prop_assert_eq!(private_key.as_bytes(), &hash(seed.as_bytes()));
        prop_assert_eq!(reveal_key.as_bytes(), &hash(hash(seed.as_bytes())));
        prop_assert_ne!(seed.private_key(), seed.reveal_key());
    }

    #[test]
    fn prop_feed_id_text_roundtrip(seed in any::<[u8; 32]>()) {
        let id = *Seed::from_bytes(seed).keypair().id();
        let parsed: FeedId = id.to_string().parse().unwrap();

        prop_assert_eq!(parsed, id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_signed_object_verifies(
        seed in any::<[u8; 32]>(),
        object in arbitrary_object(),
        domain in prop::option::of(any::<[u8; 32]>()),
    ) {
        let keys = Seed::from_bytes(seed).keypair();
        let signed = sign_object(&keys, domain.as_ref(), object);

        prop_assert!(verify_object(keys.id(), domain.as_ref(), &signed));

        let signature = signed["signature"].as_str().unwrap();
        let parsed: Signature = signature.parse().unwrap();
        prop_assert_eq!(parsed.to_string(), signature);
    }

    #[test]
    fn prop_signature_binds_domain(
        seed in any::<[u8; 32]>(),
        object in arbitrary_object(),
        domain in any::<[u8; 32]>(),
        other in prop::option::of(any::<[u8; 32]>()),
    ) {
        prop_assume!(other != Some(domain));
        let keys = Seed::from_bytes(seed).keypair();
        let signed = sign_object(&keys, Some(&domain), object);

        prop_assert!(!verify_object(keys.id(), other.as_ref(), &signed));
    }

    #[test]
    fn prop_added_field_breaks_signature(
        seed in any::<[u8; 32]>(),
        object in arbitrary_object(),
        value in "[a-z]{0,8}",
    ) {
        let keys = Seed::from_bytes(seed).keypair();
        let mut signed = sign_object(&keys, None, object);
        signed.insert("tampered_field".to_string(), json!(value));

        prop_assert!(!verify_object(keys.id(), None, &signed));
    }

    #[test]
    fn prop_message_id_is_stable(object in arbitrary_object()) {
        let value = Value::Object(object);
        let id: MessageId = message_id(&value);

        prop_assert!(id.as_str().starts_with('%'));
        prop_assert!(id.as_str().ends_with(".sha256"));
        prop_assert_eq!(id, message_id(&value.clone()));
    }
}
