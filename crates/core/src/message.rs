//! Message and Response domain types.
//!
//! These are the value objects that flow through the entire system:
//! User sends a message → Coordinator routes it → Handler processes it →
//! a Response travels back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (the student)
    User,
    /// The AI mentor
    Assistant,
    /// System instructions
    System,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Optional metadata (session info, handler info, etc.)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }
}

/// The final response produced by a handler.
///
/// Immutable once constructed: the coordinator returns it to the caller
/// unchanged. `metadata` is an open map used for observability markers
/// (which handler answered, which procedure was used, error diagnostics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The response text shown to the user
    pub content: String,

    /// Open key-value metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Response {
    /// Create a response with empty metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a metadata entry (builder-style).
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Whether this response carries an error diagnostic.
    pub fn is_degraded(&self) -> bool {
        self.metadata.contains_key("error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("I'm worried about my grades");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "I'm worried about my grades");
        assert!(msg.metadata.is_empty());
    }

    #[test]
    fn session_id_converts_from_str() {
        let id = SessionId::from("student-42");
        assert_eq!(id.to_string(), "student-42");

        let owned: SessionId = String::from("student-42").into();
        assert_eq!(owned, id);
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::assistant("Here is your study plan");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Here is your study plan");
        assert_eq!(deserialized.role, Role::Assistant);
    }

    #[test]
    fn response_metadata_builder() {
        let resp = Response::new("ok")
            .with_meta("handler", serde_json::json!("academic_advisor"))
            .with_meta("error", serde_json::json!("upstream timeout"));
        assert_eq!(resp.metadata["handler"], "academic_advisor");
        assert!(resp.is_degraded());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
