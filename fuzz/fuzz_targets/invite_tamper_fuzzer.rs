//! Fuzz target for invite and accept verification
//!
//! Prevent acceptance of forged or altered invites (CRITICAL security
//! boundary)
//!
//! # Strategy
//!
//! - Arbitrary seeds for invite, host and redeemer
//! - Optional reveal payloads
//! - One tamper per run: envelope field, content field, host, redeemer
//!
//! # Invariants
//!
//! - Untampered invite and accept MUST verify
//! - Altered envelope MUST fail the host signature and break the receipt
//! - Altered content MUST fail the invite signature
//! - Re-attributed content MUST fail with a host mismatch
//! - Redeeming with the invite identity MUST fail with identity reuse

#![no_main]

use admit_core::{InviteError, JsonObject, Keypair, Message, Seed, create_accept, create_invite};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

#[derive(Debug, Clone, Arbitrary)]
struct InviteScenario {
    seed: [u8; 32],
    host: [u8; 32],
    redeemer: [u8; 32],
    reveal: Option<String>,
    timestamp: u64,
    tamper: Tamper,
}

#[derive(Debug, Clone, Arbitrary)]
enum Tamper {
    Timestamp(u64),
    ContentField { value: String },
    Host([u8; 32]),
    RedeemWithInvite,
}

fn publish(author: &Keypair, timestamp: u64, content: JsonObject) -> Message {
    Message::sign(author, None, timestamp, content)
}

fuzz_target!(|scenario: InviteScenario| {
    if scenario.seed == scenario.host || scenario.seed == scenario.redeemer {
        return;
    }

    let seed = Seed::from_bytes(scenario.seed);
    let host = Seed::from_bytes(scenario.host).keypair();
    let redeemer = Seed::from_bytes(scenario.redeemer).keypair();
    let reveal = scenario.reveal.map(Value::from);

    let Ok(content) = create_invite(&seed, host.id(), reveal.as_ref(), None) else {
        panic!("distinct seed and host must produce an invite");
    };
    let invite = publish(&host, scenario.timestamp, content.clone());
    let Ok(accept_content) = create_accept(&invite, &seed, redeemer.id()) else {
        panic!("matching seed must produce an accept");
    };
    let accept = publish(&redeemer, scenario.timestamp, accept_content);

    // INVARIANT 1: Untampered messages verify
    assert!(admit_core::verify_invite_public(&invite).is_ok(), "valid invite must verify");
    assert_eq!(
        admit_core::verify_accept(&accept, &invite),
        Ok(reveal),
        "valid accept must verify and reveal"
    );

    match scenario.tamper {
        Tamper::Timestamp(timestamp) => {
            if timestamp == scenario.timestamp {
                return;
            }
            let mut object = invite.clone().into_object();
            object.insert("timestamp".to_string(), json!(timestamp));
            let Ok(altered) = Message::from_object(object) else {
                panic!("altered envelope is still well-formed");
            };

            // INVARIANT 2: Envelope tamper
            assert_eq!(
                admit_core::verify_invite_public(&altered),
                Err(InviteError::InvalidSignature { signer: "host" })
            );
            assert!(matches!(
                admit_core::verify_accept(&accept, &altered),
                Err(InviteError::ReceiptMismatch { .. })
            ));
        },
        Tamper::ContentField { value } => {
            let mut altered = content;
            altered.insert("note".to_string(), json!(value));

            // INVARIANT 3: Content tamper
            assert_eq!(
                admit_core::verify_invite_public(&publish(&host, scenario.timestamp, altered)),
                Err(InviteError::InvalidSignature { signer: "invite" })
            );
        },
        Tamper::Host(other) => {
            if other == scenario.host {
                return;
            }
            let thief = Seed::from_bytes(other).keypair();

            // INVARIANT 4: Re-attribution
            assert!(matches!(
                admit_core::verify_invite_public(&publish(&thief, scenario.timestamp, content)),
                Err(InviteError::HostMismatch { .. })
            ));
        },
        Tamper::RedeemWithInvite => {
            let own = seed.keypair();
            let Ok(reused) = create_accept(&invite, &seed, own.id()) else {
                panic!("matching seed must produce an accept");
            };

            // INVARIANT 5: Identity reuse
            assert_eq!(
                admit_core::verify_accept(&publish(&own, scenario.timestamp, reused), &invite),
                Err(InviteError::IdentityReuse { id: *own.id() })
            );
        },
    }
});
