//! Wire constants shared by invite and accept messages.

/// `type` tag of invite content
pub const INVITE_TYPE: &str = "invite";

/// `type` tag of accept content
pub const ACCEPT_TYPE: &str = "invite/accept";

/// Label hashed into the default domain secret
pub const DEVELOPMENT_DOMAIN_LABEL: &str = "user-invites:development";

/// `hash` field of outer messages, naming the message id algorithm
pub const MESSAGE_HASH_ALGORITHM: &str = "sha256";
