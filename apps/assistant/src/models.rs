use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::intent::Intent;

/// The sender of a message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single message in a conversation. Immutable once created; appended to the
/// session's ordered history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The unique identifier for the message.
    pub id: Uuid,
    /// The role of the message sender.
    pub role: Role,
    /// The text content of the message.
    pub text: String,
    /// Timestamp of when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id and the current timestamp.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// A follow-up question proposed by the suggestion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedQuestion {
    /// The unique identifier for the suggestion.
    pub id: Uuid,
    /// The question text, ready to display.
    pub text: String,
    /// The intent this question routes to when the visitor picks it.
    pub intent: Intent,
    /// Priority of the strategy that produced it (higher wins).
    pub priority: u8,
}

impl SuggestedQuestion {
    pub fn new(text: impl Into<String>, intent: Intent, priority: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            intent,
            priority,
        }
    }
}

/// The output of one assistant turn.
///
/// `text` may embed deep-link directives using the literal bracket syntax
/// `[LINK:<path>:<label>]`, repeatable; the presentation layer parses these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    /// The response text shown to the visitor.
    pub text: String,
    /// Up to `EngineConfig::suggestion_limit` follow-up questions.
    pub suggestions: Vec<SuggestedQuestion>,
    /// The intent the turn resolved to.
    pub intent: Intent,
    /// Confidence of the classification (0-100). Detector-resolved turns
    /// report 100.
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "hello");

        let msg = Message::assistant("hi there");
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_message_ids_unique() {
        let a = Message::user("one");
        let b = Message::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
