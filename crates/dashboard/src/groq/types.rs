//! Types for the OpenAI-compatible chat-completions API.

use serde::{Deserialize, Serialize};

use dynamic_pricing_core::ChatRole;

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl From<ChatRole> for Role {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::Human => Self::User,
            ChatRole::Assistant => Self::Assistant,
        }
    }
}

/// A message in a chat-completion request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: Role,
    /// The text of the message.
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use (e.g., "llama3-8b-8192").
    pub model: String,
    /// Conversation messages, system prompt first.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Response from the chat-completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique response ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Model that generated the response.
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices (one unless `n` is set).
    pub choices: Vec<Choice>,
    /// Token usage information.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Choice index.
    #[serde(default)]
    pub index: u32,
    /// The generated message.
    pub message: Message,
    /// Why generation stopped ("stop", "length", ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama3-8b-8192".to_string(),
            messages: vec![Message::system("be brief"), Message::user("hi")],
            temperature: 0.0,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "llama3-8b-8192",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Average margin is 35%."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.first_content(), Some("Average margin is 35%."));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(48));
    }

    #[test]
    fn test_response_without_choices() {
        let json = r#"{"choices": []}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.first_content().is_none());
    }

    #[test]
    fn test_role_from_chat_role() {
        assert_eq!(Role::from(ChatRole::Human), Role::User);
        assert_eq!(Role::from(ChatRole::Assistant), Role::Assistant);
    }
}
