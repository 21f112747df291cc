//! Invite issuing and verification
//!
//! An invite is content signed by the seed-derived identity under the
//! protocol domain, published by its host in an ordinary message. Checking it
//! publicly needs no secret; opening its payloads needs the seed.

use admit_crypto::{FeedId, JsonObject, Seed, open, seal};
use serde_json::Value;

use crate::{
    content::{InviteContent, Revealed},
    error::{InviteError, Result},
    message::Message,
    protocol::InviteProtocol,
};

impl InviteProtocol<'_> {
    /// Create signed invite content.
    ///
    /// `reveal` is boxed under `hash(hash(seed))` and `private` under
    /// `hash(seed)`; absent payloads are omitted. The caller publishes the
    /// result as the content of a message authored by `host`.
    ///
    /// # Errors
    ///
    /// - `SelfInvite`: the seed derives `host` itself
    /// - `Crypto`: a payload could not be serialized
    pub fn create_invite(
        &self,
        seed: &Seed,
        host: &FeedId,
        reveal: Option<&Value>,
        private: Option<&Value>,
    ) -> Result<JsonObject> {
        let keys = seed.keypair();
        if keys.id() == host {
            return Err(InviteError::SelfInvite);
        }

        let content = InviteContent {
            invite: *keys.id(),
            host: *host,
            reveal: seal(reveal, &seed.reveal_key())?,
            private: seal(private, &seed.private_key())?,
        };

        tracing::debug!(
            invite = %content.invite,
            %host,
            reveal = content.reveal.is_some(),
            private = content.private.is_some(),
            "created invite"
        );

        Ok(self.sign_content(&keys, content.to_object()))
    }

    /// Verify an invite message using public information only.
    ///
    /// Confirms the host attribution, the invite identity's domain-bound
    /// signature over the content, and the host's signature over the message.
    /// Returns the parsed content.
    ///
    /// # Errors
    ///
    /// - `HostMismatch`: content names a host other than the author
    /// - `InvalidSignature`: invite or host signature does not verify
    /// - `Malformed`: content is not invite content
    pub fn verify_invite_public(&self, message: &Message) -> Result<InviteContent> {
        self.check_invite(message)
            .inspect_err(|error| tracing::debug!(%error, "rejected invite"))
    }

    /// Verify an invite message and open its payloads with the seed.
    ///
    /// # Errors
    ///
    /// - Every error of [`Self::verify_invite_public`]
    /// - `DecryptionFailure`: a present payload does not open under its
    ///   seed-derived key
    pub fn verify_invite_private(&self, message: &Message, seed: &Seed) -> Result<Revealed> {
        let content = self.verify_invite_public(message)?;

        let reveal = content
            .reveal
            .as_deref()
            .map(|boxed| {
                open(boxed, &seed.reveal_key())
                    .ok_or(InviteError::DecryptionFailure { payload: "reveal" })
            })
            .transpose()?;

        let private = content
            .private
            .as_deref()
            .map(|boxed| {
                open(boxed, &seed.private_key())
                    .ok_or(InviteError::DecryptionFailure { payload: "private" })
            })
            .transpose()?;

        Ok(Revealed { reveal, private })
    }

    fn check_invite(&self, message: &Message) -> Result<InviteContent> {
        let content = InviteContent::from_object(message.content())?;

        let author = *message.author();
        if content.host != author {
            return Err(InviteError::HostMismatch { host: content.host, author });
        }

        if !self.verify_content(&content.invite, message.content()) {
            return Err(InviteError::InvalidSignature { signer: "invite" });
        }

        // Ordinary message signature, no domain
        if !message.verify_author_signature() {
            return Err(InviteError::InvalidSignature { signer: "host" });
        }

        Ok(content)
    }
}
