//! Typed views of invite and accept content
//!
//! Signatures cover the raw JSON object, so verification always works on the
//! object as received. These types are for reading fields and for building new
//! content; serializing them yields the wire field order (`type` first, then
//! fields as declared, absent options omitted).

use admit_crypto::{FeedId, JsonObject, MessageId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    constants::{ACCEPT_TYPE, INVITE_TYPE},
    error::{InviteError, Result},
};

/// Content of an invite or accept message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// `type: "invite"`
    #[serde(rename = "invite")]
    Invite(InviteContent),
    /// `type: "invite/accept"`
    #[serde(rename = "invite/accept")]
    Accept(AcceptContent),
}

impl Content {
    /// Parse content from a JSON object.
    ///
    /// Unknown fields (including `signature`) are ignored.
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        serde_json::from_value(Value::Object(object.clone()))
            .map_err(|e| InviteError::Malformed { field: "content", reason: e.to_string() })
    }

    /// Serialize to an unsigned JSON object.
    pub fn to_object(&self) -> JsonObject {
        let Ok(Value::Object(object)) = serde_json::to_value(self) else {
            unreachable!("content serializes to a JSON object");
        };
        object
    }
}

/// Invite content: `{type, invite, host, reveal?, private?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteContent {
    /// Identity derived from the invite seed
    pub invite: FeedId,
    /// Identity that issued the invite
    pub host: FeedId,
    /// Payload boxed under `hash(hash(seed))`, disclosed on accept
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub reveal: Option<String>,
    /// Payload boxed under `hash(seed)`, readable only by seed holders
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
}

impl InviteContent {
    /// Parse invite content, rejecting any other content type.
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        match Content::from_object(object)? {
            Content::Invite(invite) => Ok(invite),
            Content::Accept(_) => Err(wrong_type(INVITE_TYPE, ACCEPT_TYPE)),
        }
    }

    /// Unsigned JSON object with `type: "invite"`.
    pub fn to_object(&self) -> JsonObject {
        Content::Invite(self.clone()).to_object()
    }
}

/// Accept content: `{type, reciept, id, key?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptContent {
    /// Id of the invite message being redeemed
    #[serde(rename = "reciept")]
    pub receipt: MessageId,
    /// New identity being admitted
    pub id: FeedId,
    /// Base64 reveal key, present only when the invite has a reveal payload
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl AcceptContent {
    /// Parse accept content, rejecting any other content type.
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        match Content::from_object(object)? {
            Content::Accept(accept) => Ok(accept),
            Content::Invite(_) => Err(wrong_type(ACCEPT_TYPE, INVITE_TYPE)),
        }
    }

    /// Unsigned JSON object with `type: "invite/accept"`.
    pub fn to_object(&self) -> JsonObject {
        Content::Accept(self.clone()).to_object()
    }
}

/// Payloads a seed holder recovered from an invite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revealed {
    /// Decrypted reveal payload, if the invite had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Value>,
    /// Decrypted private payload, if the invite had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<Value>,
}

/// Empty and null strings read as absent.
fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

fn wrong_type(expected: &str, actual: &str) -> InviteError {
    InviteError::Malformed { field: "type", reason: format!("expected {expected}, got {actual}") }
}

#[cfg(test)]
mod tests {
    use admit_crypto::Seed;
    use serde_json::json;

    use super::*;

    fn id(byte: u8) -> FeedId {
        *Seed::from_bytes([byte; 32]).keypair().id()
    }

    #[test]
    fn invite_serializes_in_wire_order() {
        let content = InviteContent {
            invite: id(0),
            host: id(1),
            reveal: Some("cmV2ZWFs".to_string()),
            private: None,
        };
        let object = content.to_object();
        let fields: Vec<_> = object.keys().map(String::as_str).collect();

        assert_eq!(fields, ["type", "invite", "host", "reveal"]);
        assert_eq!(object["type"], json!("invite"));
        assert_eq!(object["invite"], json!(id(0).to_string()));
    }

    #[test]
    fn absent_options_are_omitted_not_null() {
        let content = InviteContent { invite: id(0), host: id(1), reveal: None, private: None };

        assert!(!content.to_object().contains_key("reveal"));
        assert!(!content.to_object().contains_key("private"));
    }

    #[test]
    fn accept_uses_wire_field_name() {
        let content = AcceptContent {
            receipt: serde_json::from_value(json!("%abc.sha256")).unwrap(),
            id: id(2),
            key: None,
        };
        let object = content.to_object();
        let fields: Vec<_> = object.keys().map(String::as_str).collect();

        assert_eq!(fields, ["type", "reciept", "id"]);
        assert_eq!(object["type"], json!("invite/accept"));
    }

    #[test]
    fn parse_ignores_signature_field() {
        let mut object = InviteContent { invite: id(0), host: id(1), reveal: None, private: None }
            .to_object();
        object.insert("signature".to_string(), json!("sig"));

        let parsed = InviteContent::from_object(&object).unwrap();
        assert_eq!(parsed.host, id(1));
    }

    #[test]
    fn parse_rejects_wrong_type() {
        let invite =
            InviteContent { invite: id(0), host: id(1), reveal: None, private: None }.to_object();

        assert!(matches!(
            AcceptContent::from_object(&invite),
            Err(InviteError::Malformed { field: "type", .. })
        ));
    }

    #[test]
    fn parse_rejects_unknown_type_and_missing_fields() {
        let post = json!({"type": "post", "text": "hi"});
        let Value::Object(post) = post else { unreachable!() };
        assert!(matches!(
            Content::from_object(&post),
            Err(InviteError::Malformed { field: "content", .. })
        ));

        let partial = json!({"type": "invite", "invite": id(0).to_string()});
        let Value::Object(partial) = partial else { unreachable!() };
        assert!(InviteContent::from_object(&partial).is_err());
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        let bad = json!({"type": "invite", "invite": "@nope", "host": id(1).to_string()});
        let Value::Object(bad) = bad else { unreachable!() };

        assert!(matches!(
            InviteContent::from_object(&bad),
            Err(InviteError::Malformed { field: "content", .. })
        ));
    }

    #[test]
    fn empty_payload_fields_read_as_absent() {
        let invite = json!({
            "type": "invite",
            "invite": id(0).to_string(),
            "host": id(1).to_string(),
            "reveal": "",
            "private": null,
        });
        let Value::Object(invite) = invite else { unreachable!() };
        let parsed = InviteContent::from_object(&invite).unwrap();
        assert_eq!((parsed.reveal, parsed.private), (None, None));

        let accept = json!({
            "type": "invite/accept",
            "reciept": "%abc.sha256",
            "id": id(2).to_string(),
            "key": "",
        });
        let Value::Object(accept) = accept else { unreachable!() };
        assert_eq!(AcceptContent::from_object(&accept).unwrap().key, None);
    }

    #[test]
    fn revealed_omits_absent_payloads() {
        let revealed = Revealed { reveal: Some(json!({"ok": true})), private: None };

        assert_eq!(serde_json::to_value(&revealed).unwrap(), json!({"reveal": {"ok": true}}));
    }
}
