//! Chat data models
//!
//! Request and response bodies of `POST /api/chat`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the assistant/AI
    Assistant,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The agent a conversation is held with
///
/// Only `name` is read. Whatever else the client sends about the agent is
/// kept as-is, whatever its type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Display name used in the reply
    pub name: String,
    /// Remaining agent fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<ChatMessage>,
    /// Agent answering the conversation
    pub agent: AgentDescriptor,
}

/// Success body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_full_agent() {
        let json = r#"{
            "messages": [{"role": "user", "content": "hi"}],
            "agent": {
                "id": "1700000000000",
                "name": "Kod Asistanı",
                "description": "Yazılım geliştirme ve kod inceleme uzmanı",
                "prompt": "Sen deneyimli bir yazılım geliştiricisisin.",
                "model": "gpt-4",
                "temperature": 0.7,
                "maxTokens": 2000,
                "createdAt": "2024-05-01T10:00:00.000Z"
            }
        }"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.agent.name, "Kod Asistanı");
        assert_eq!(request.agent.extra["maxTokens"], 2000);
        assert!(!request.agent.extra.contains_key("name"));
    }

    #[test]
    fn test_request_with_name_only() {
        let json = r#"{"messages": [], "agent": {"name": "Bot", "maxTokens": null}}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert!(request.messages.is_empty());
        assert_eq!(request.agent.extra["maxTokens"], Value::Null);
    }

    #[test]
    fn test_agent_fields_of_any_type_are_accepted() {
        let json = r#"{"messages": [], "agent": {"name": "Bot", "id": 1, "temperature": "0.7", "createdAt": "2024-05-01"}}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.agent.name, "Bot");
        assert_eq!(request.agent.extra["id"], 1);
        assert_eq!(request.agent.extra["temperature"], "0.7");
    }

    #[test]
    fn test_request_requires_agent_name() {
        let json = r#"{"messages": [], "agent": {"model": "gpt-4"}}"#;
        assert!(serde_json::from_str::<ChatRequest>(json).is_err());
    }

    #[test]
    fn test_response_serialization() {
        let response = ChatResponse {
            message: ChatMessage::assistant("ok"),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"message":{"role":"assistant","content":"ok"}}"#);
    }
}
