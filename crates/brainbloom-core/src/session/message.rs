//! Conversation message types.
//!
//! Messages are immutable once created and are only ever appended to the
//! session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Who authored a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    /// The person using the app.
    User,
    /// The support agent replying to the user.
    #[serde(alias = "ai")]
    #[strum(to_string = "agent", serialize = "ai")]
    Agent,
    /// System-generated notice.
    System,
}

/// Classification tag attached to a message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Normal,
    Crisis,
    Warning,
}

/// A single message in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID v4)
    pub id: String,
    /// The text of the message
    pub content: String,
    /// Author of the message
    pub sender: Sender,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Optional classification tag
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
}

impl Message {
    /// Creates a message stamped with a fresh id and the current time.
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            kind: None,
        }
    }

    /// Creates a user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Creates an agent reply with the given classification.
    pub fn agent(content: impl Into<String>, kind: MessageKind) -> Self {
        Self::new(Sender::Agent, content).with_kind(kind)
    }

    /// Sets the classification tag.
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns true if this message was tagged as crisis-indicating.
    pub fn is_crisis(&self) -> bool {
        self.kind == Some(MessageKind::Crisis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_message_has_no_kind() {
        let msg = Message::user("hello");
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.kind.is_none());
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_sender_accepts_legacy_ai_label() {
        let sender: Sender = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(sender, Sender::Agent);
        assert_eq!(Sender::from_str("ai").unwrap(), Sender::Agent);
        assert_eq!(Sender::Agent.to_string(), "agent");
    }

    #[test]
    fn test_kind_serializes_under_type_key() {
        let msg = Message::agent("I'm here for you.", MessageKind::Crisis);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "crisis");
        assert_eq!(json["sender"], "agent");
        assert!(msg.is_crisis());
    }
}
