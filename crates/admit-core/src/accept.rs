//! Accept issuing and verification
//!
//! Redeeming an invite binds a new identity to the exact invite message via its
//! receipt, signed by the seed-derived invite identity. When the invite carries
//! a reveal payload, the accept discloses the key that opens it, so anyone
//! holding both messages can read the reveal afterwards.

use admit_crypto::{BoxKey, FeedId, JsonObject, Seed, open, verify_object};
use serde_json::Value;

use crate::{
    content::{AcceptContent, InviteContent},
    error::{InviteError, Result},
    message::Message,
    protocol::InviteProtocol,
};

impl InviteProtocol<'_> {
    /// Create signed accept content redeeming `invite` for `id`.
    ///
    /// The caller publishes the result as the content of a message authored
    /// by `id`.
    ///
    /// # Errors
    ///
    /// - `SeedMismatch`: the seed does not derive the invite identity
    /// - `Malformed`: `invite` does not carry invite content
    pub fn create_accept(&self, invite: &Message, seed: &Seed, id: &FeedId) -> Result<JsonObject> {
        let invite_content = InviteContent::from_object(invite.content())?;
        let keys = seed.keypair();
        if *keys.id() != invite_content.invite {
            return Err(InviteError::SeedMismatch);
        }

        let content = AcceptContent {
            receipt: invite.id(),
            id: *id,
            key: invite_content.reveal.is_some().then(|| seed.reveal_key().to_base64()),
        };

        tracing::debug!(
            invite = %invite_content.invite,
            receipt = %content.receipt,
            %id,
            "created accept"
        );

        Ok(self.sign_content(&keys, content.to_object()))
    }

    /// Verify an accept against the invite it redeems.
    ///
    /// Returns the opened reveal payload when the invite has one.
    ///
    /// # Errors
    ///
    /// - `ReceiptMismatch`: accept was issued for a different invite message
    /// - `IdentityReuse`: redeemer is the invite identity itself
    /// - `RevealFailure`: disclosed key is missing or does not open the reveal
    /// - `InvalidSignature`: invite or redeemer signature does not verify
    /// - `Malformed`: either message carries the wrong kind of content
    pub fn verify_accept(&self, accept: &Message, invite: &Message) -> Result<Option<Value>> {
        self.check_accept(accept, invite)
            .inspect_err(|error| tracing::debug!(%error, "rejected accept"))
    }

    fn check_accept(&self, accept: &Message, invite: &Message) -> Result<Option<Value>> {
        let accept_content = AcceptContent::from_object(accept.content())?;
        let invite_content = InviteContent::from_object(invite.content())?;

        let expected = invite.id();
        if accept_content.receipt != expected {
            return Err(InviteError::ReceiptMismatch { expected, actual: accept_content.receipt });
        }

        let reused = *accept.author() == invite_content.invite;
        if reused || accept_content.id == invite_content.invite {
            return Err(InviteError::IdentityReuse { id: invite_content.invite });
        }

        let revealed = match invite_content.reveal.as_deref() {
            Some(boxed) => {
                let key = accept_content
                    .key
                    .as_deref()
                    .and_then(|key| BoxKey::from_base64(key).ok())
                    .ok_or(InviteError::RevealFailure)?;
                Some(open(boxed, &key).ok_or(InviteError::RevealFailure)?)
            },
            None => None,
        };

        if !self.verify_content(&invite_content.invite, accept.content()) {
            return Err(InviteError::InvalidSignature { signer: "invite" });
        }

        if !verify_object(&accept_content.id, None, accept.as_object()) {
            return Err(InviteError::InvalidSignature { signer: "redeemer" });
        }

        Ok(revealed)
    }
}
