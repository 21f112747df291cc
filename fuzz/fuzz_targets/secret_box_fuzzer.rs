//! Fuzz target for payload boxes
//!
//! # Strategy
//!
//! - Arbitrary keys and string payloads
//! - Bit flips anywhere in the sealed bytes
//! - Truncated and raw garbage ciphertext
//!
//! # Invariants
//!
//! - Sealing is deterministic for a key and payload
//! - Open under the sealing key returns the payload
//! - Open under any other key returns nothing
//! - Any corrupted or truncated box returns nothing
//! - NEVER panic on arbitrary ciphertext text

#![no_main]

use admit_crypto::{BoxKey, open, seal};
use arbitrary::Arbitrary;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct BoxScenario {
    key: [u8; 32],
    other_key: [u8; 32],
    payload: String,
    attack: BoxAttack,
}

#[derive(Debug, Clone, Arbitrary)]
enum BoxAttack {
    FlipBit { byte_offset: u16, bit_offset: u8 },
    Truncate { keep: u16 },
    Garbage { text: String },
}

fuzz_target!(|scenario: BoxScenario| {
    let key = BoxKey::from_bytes(scenario.key);

    let Ok(Some(sealed)) = seal(Some(&scenario.payload), &key) else {
        panic!("string payloads always seal");
    };

    // INVARIANT 1: Deterministic
    let Ok(again) = seal(Some(&scenario.payload), &key) else {
        panic!("string payloads always seal");
    };
    assert_eq!(again.as_deref(), Some(sealed.as_str()), "sealing must be deterministic");

    // INVARIANT 2: Roundtrip
    assert_eq!(
        open::<String>(&sealed, &key).as_deref(),
        Some(scenario.payload.as_str()),
        "sealing key must open its box"
    );

    // INVARIANT 3: Wrong key
    if scenario.other_key != scenario.key {
        let other = BoxKey::from_bytes(scenario.other_key);
        assert_eq!(open::<String>(&sealed, &other), None, "other key must not open the box");
    }

    let Ok(mut raw) = STANDARD.decode(&sealed) else {
        panic!("sealed boxes are base64");
    };

    match scenario.attack {
        BoxAttack::FlipBit { byte_offset, bit_offset } => {
            // INVARIANT 4: Corruption detected
            let index = usize::from(byte_offset) % raw.len();
            raw[index] ^= 1 << (bit_offset % 8);
            assert_eq!(
                open::<String>(&STANDARD.encode(&raw), &key),
                None,
                "corrupted box must not open"
            );
        },
        BoxAttack::Truncate { keep } => {
            // INVARIANT 4: Truncation detected
            let keep = usize::from(keep) % raw.len();
            assert_eq!(
                open::<String>(&STANDARD.encode(&raw[..keep]), &key),
                None,
                "truncated box must not open"
            );
        },
        BoxAttack::Garbage { text } => {
            // INVARIANT 5: Never panics
            let _ = open::<serde_json::Value>(&text, &key);
        },
    }
});
