//! Domain separation for invite signatures
//!
//! Invite and accept content is signed under a domain secret so those
//! signatures can never be mistaken for ordinary message signatures made by
//! the same key. Deployments that must not accept each other's invites use
//! different labels.

use std::{fmt, sync::LazyLock};

use admit_crypto::{HASH_SIZE, hash};

use crate::constants::DEVELOPMENT_DOMAIN_LABEL;

static DEVELOPMENT: LazyLock<InviteDomain> =
    LazyLock::new(|| InviteDomain::from_label(DEVELOPMENT_DOMAIN_LABEL));

/// Domain secret: `hash(label)`.
#[derive(Clone, PartialEq, Eq)]
pub struct InviteDomain {
    label: String,
    secret: [u8; HASH_SIZE],
}

impl InviteDomain {
    /// Derive a domain from its label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let secret = hash(&label);
        Self { label, secret }
    }

    /// The process-wide default domain (`user-invites:development`).
    ///
    /// Computed on first use and immutable afterwards.
    pub fn development() -> &'static Self {
        &DEVELOPMENT
    }

    /// Label the secret was derived from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Secret keying domain-bound signatures.
    pub fn secret(&self) -> &[u8; HASH_SIZE] {
        &self.secret
    }
}

impl fmt::Debug for InviteDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InviteDomain").field(&self.label).finish()
    }
}
