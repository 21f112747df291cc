//! Outer message envelope
//!
//! Invite and accept content travels inside ordinary signed messages. The
//! envelope is owned by the surrounding network, so verification accepts any
//! object that has an `author`, an object `content` and a `signature`, and
//! keeps every other field untouched: the receipt of an invite is the hash of
//! the whole message exactly as received.
//!
//! [`Message::sign`] builds the classic envelope for callers (and tests) that
//! have none of their own:
//!
//! ```text
//! {previous, author, sequence, timestamp, hash, content, signature}
//! ```

use admit_crypto::{FeedId, JsonObject, Keypair, MessageId, message_id, sign_object, verify_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    constants::MESSAGE_HASH_ALGORITHM,
    error::{InviteError, Result},
};

/// A signed message carrying invite or accept content.
///
/// # Invariants
///
/// - `author` is a well-formed feed id
/// - `content` is a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonObject", into = "JsonObject")]
pub struct Message {
    object: JsonObject,
    author: FeedId,
}

impl Message {
    /// Wrap a received message object.
    ///
    /// # Errors
    ///
    /// - `Malformed`: `author` is missing or not a feed id, or `content` is
    ///   not an object
    pub fn from_object(object: JsonObject) -> Result<Self> {
        let author = match object.get("author") {
            Some(Value::String(author)) => author.parse::<FeedId>().map_err(|e| {
                InviteError::Malformed { field: "author", reason: e.to_string() }
            })?,
            _ => {
                return Err(InviteError::Malformed {
                    field: "author",
                    reason: "missing author".to_string(),
                });
            },
        };

        if !matches!(object.get("content"), Some(Value::Object(_))) {
            return Err(InviteError::Malformed {
                field: "content",
                reason: "content must be an object".to_string(),
            });
        }

        Ok(Self { object, author })
    }

    /// Wrap a received message value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            _ => Err(InviteError::Malformed {
                field: "message",
                reason: "message must be an object".to_string(),
            }),
        }
    }

    /// Create a message authored and ordinarily signed by `keys`.
    ///
    /// Chains onto `previous` when given (its id becomes `previous`, its
    /// sequence plus one becomes `sequence`), otherwise starts a feed at
    /// sequence 1. `timestamp` is supplied by the caller.
    pub fn sign(
        keys: &Keypair,
        previous: Option<&Message>,
        timestamp: u64,
        content: JsonObject,
    ) -> Self {
        let sequence = previous.and_then(Message::sequence).map_or(1, |seq| seq + 1);

        let mut object = JsonObject::new();
        object.insert(
            "previous".to_string(),
            previous.map_or(Value::Null, |prev| Value::String(prev.id().to_string())),
        );
        object.insert("author".to_string(), Value::String(keys.id().to_string()));
        object.insert("sequence".to_string(), Value::from(sequence));
        object.insert("timestamp".to_string(), Value::from(timestamp));
        object.insert("hash".to_string(), Value::String(MESSAGE_HASH_ALGORITHM.to_string()));
        object.insert("content".to_string(), Value::Object(content));

        Self { object: sign_object(keys, None, object), author: *keys.id() }
    }

    /// Author of the message.
    pub fn author(&self) -> &FeedId {
        &self.author
    }

    /// Message content.
    pub fn content(&self) -> &JsonObject {
        let Some(Value::Object(content)) = self.object.get("content") else {
            unreachable!("content is checked to be an object on construction");
        };
        content
    }

    /// Position in the author's feed, if the envelope carries one.
    pub fn sequence(&self) -> Option<u64> {
        self.object.get("sequence").and_then(Value::as_u64)
    }

    /// Content-addressed id of the whole message, signature included.
    pub fn id(&self) -> MessageId {
        message_id(&Value::Object(self.object.clone()))
    }

    /// Whether `author` ordinarily signed this message.
    pub fn verify_author_signature(&self) -> bool {
        verify_object(&self.author, None, &self.object)
    }

    /// The message as a JSON object.
    pub fn as_object(&self) -> &JsonObject {
        &self.object
    }

    /// Unwrap into the JSON object.
    pub fn into_object(self) -> JsonObject {
        self.object
    }
}

impl TryFrom<JsonObject> for Message {
    type Error = InviteError;

    fn try_from(object: JsonObject) -> Result<Self> {
        Self::from_object(object)
    }
}

impl From<Message> for JsonObject {
    fn from(message: Message) -> Self {
        message.object
    }
}
