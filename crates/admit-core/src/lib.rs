//! Admit
//!
//! Single-use invite capabilities for a signed-message network. A host issues
//! an invite bound to a fresh seed; whoever holds the seed redeems it by
//! naming a new identity in an accept; anyone holding both messages can check
//! the redemption.
//!
//! # Flow
//!
//! ```text
//! host                         seed holder                   observer
//!  │ create_invite(seed, host)      │                            │
//!  │──── invite message ───────────►│                            │
//!  │                                │ verify_invite_private      │
//!  │                                │ create_accept(invite, id)  │
//!  │◄─── accept message ────────────│──── accept message ───────►│
//!  │ verify_accept                  │                            │ verify_accept
//! ```
//!
//! All operations are pure: content objects in, content objects or verdicts
//! out. Wrapping content in outer messages is the caller's job; [`Message`]
//! provides the classic envelope for callers without one.
//!
//! # Components
//!
//! - [`InviteProtocol`]: The five operations bound to an [`InviteDomain`]
//! - [`Content`]: Typed invite and accept content
//! - [`Message`]: Outer message with author and ordinary signature
//! - [`InviteError`]: Protocol rejections and malformed input
//!
//! Free functions ([`create_invite`], [`verify_invite_public`],
//! [`verify_invite_private`], [`create_accept`], [`verify_accept`]) run under
//! the development domain.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accept;
pub mod constants;
mod content;
mod domain;
mod error;
mod invite;
mod message;
mod protocol;

pub use admit_crypto::{FeedId, JsonObject, Keypair, MessageId, Seed};
pub use content::{AcceptContent, Content, InviteContent, Revealed};
pub use domain::InviteDomain;
pub use error::{InviteError, Result};
pub use message::Message;
pub use protocol::{
    InviteProtocol, create_accept, create_invite, verify_accept, verify_invite_private,
    verify_invite_public,
};
