//! Protocol facade binding the invite flows to a signing domain.

use admit_crypto::{FeedId, JsonObject, Keypair, Seed, sign_object, verify_object};
use serde_json::Value;

use crate::{
    content::{InviteContent, Revealed},
    domain::InviteDomain,
    error::Result,
    message::Message,
};

/// Invite and accept operations under one domain secret.
///
/// All operations are pure: no I/O, no shared mutable state, safe to call
/// from any thread.
#[derive(Debug, Clone, Copy)]
pub struct InviteProtocol<'d> {
    domain: &'d InviteDomain,
}

impl<'d> InviteProtocol<'d> {
    /// Bind the protocol to a domain.
    pub fn new(domain: &'d InviteDomain) -> Self {
        Self { domain }
    }

    /// Domain-bound signature over content.
    pub(crate) fn sign_content(&self, keys: &Keypair, content: JsonObject) -> JsonObject {
        sign_object(keys, Some(self.domain.secret()), content)
    }

    /// Verify a domain-bound content signature.
    pub(crate) fn verify_content(&self, signer: &FeedId, content: &JsonObject) -> bool {
        verify_object(signer, Some(self.domain.secret()), content)
    }
}

impl Default for InviteProtocol<'static> {
    fn default() -> Self {
        Self::new(InviteDomain::development())
    }
}

/// Create invite content for `host` under the development domain.
///
/// See [`InviteProtocol::create_invite`].
pub fn create_invite(
    seed: &Seed,
    host: &FeedId,
    reveal: Option<&Value>,
    private: Option<&Value>,
) -> Result<JsonObject> {
    InviteProtocol::default().create_invite(seed, host, reveal, private)
}

/// Verify an invite message without the seed.
///
/// See [`InviteProtocol::verify_invite_public`].
pub fn verify_invite_public(message: &Message) -> Result<InviteContent> {
    InviteProtocol::default().verify_invite_public(message)
}

/// Verify an invite message and open its payloads with the seed.
///
/// See [`InviteProtocol::verify_invite_private`].
pub fn verify_invite_private(message: &Message, seed: &Seed) -> Result<Revealed> {
    InviteProtocol::default().verify_invite_private(message, seed)
}

/// Redeem an invite for a new identity.
///
/// See [`InviteProtocol::create_accept`].
pub fn create_accept(invite: &Message, seed: &Seed, id: &FeedId) -> Result<JsonObject> {
    InviteProtocol::default().create_accept(invite, seed, id)
}

/// Verify an accept against the invite it redeems.
///
/// See [`InviteProtocol::verify_accept`].
pub fn verify_accept(accept: &Message, invite: &Message) -> Result<Option<Value>> {
    InviteProtocol::default().verify_accept(accept, invite)
}
