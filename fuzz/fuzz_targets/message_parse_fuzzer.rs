//! Fuzz target for received messages
//!
//! Feeds arbitrary bytes through JSON parsing, envelope checks and every
//! verifier.
//!
//! # Invariants
//!
//! - NEVER panic on arbitrary input
//! - Unparseable envelopes are malformed, never rejections
//! - A parsed message keeps its exact object (same id after re-serializing)

#![no_main]

use admit_core::{InviteError, Message, Seed};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let message = match Message::from_value(value) {
        Ok(message) => message,
        Err(error) => {
            // INVARIANT 2: Envelope errors are structural
            assert!(matches!(error, InviteError::Malformed { .. }), "unexpected error: {error}");
            return;
        },
    };

    // INVARIANT 3: Exact object preserved
    let Ok(text) = serde_json::to_string(&message) else {
        panic!("parsed messages serialize");
    };
    let Ok(reparsed) = serde_json::from_str::<Message>(&text) else {
        panic!("serialized messages parse");
    };
    assert_eq!(reparsed.id(), message.id(), "id must survive a round trip");

    // INVARIANT 1: Verifiers never panic
    let _ = admit_core::verify_invite_public(&message);
    let _ = admit_core::verify_invite_private(&message, &Seed::from_bytes([0; 32]));
    let _ = admit_core::verify_accept(&message, &message);
});
