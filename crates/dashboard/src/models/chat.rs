//! Chat domain models.

use serde::{Deserialize, Serialize};

use dynamic_pricing_core::{ChatMessageId, ChatRole, UserId};

/// A persisted question/answer pair from `chat_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    /// Row ID (monotonic, so it doubles as insertion order).
    pub id: ChatMessageId,
    /// Owner of the exchange.
    pub user_id: UserId,
    /// What the user typed.
    pub message: String,
    /// What the model answered.
    pub response: String,
}

/// One message in the in-memory transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who said it.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl TranscriptEntry {
    /// Whether the user wrote this entry.
    #[must_use]
    pub const fn is_human(&self) -> bool {
        matches!(self.role, ChatRole::Human)
    }
}

/// The running conversation for the active session.
///
/// Lives in the session store, so it is lost on logout or restart. The
/// persisted copy is `chat_history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<TranscriptEntry>);

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a completed exchange (human message, then assistant reply).
    pub fn push_exchange(&mut self, message: impl Into<String>, response: impl Into<String>) {
        self.0.push(TranscriptEntry {
            role: ChatRole::Human,
            content: message.into(),
        });
        self.0.push(TranscriptEntry {
            role: ChatRole::Assistant,
            content: response.into(),
        });
    }

    /// Entries in conversation order.
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.0
    }

    /// Returns `true` if nothing has been said yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries (two per exchange).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_exchange_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("What is margin?", "Price minus cost, over price.");
        transcript.push_exchange("Thanks", "You're welcome.");

        let roles: Vec<ChatRole> = transcript.entries().iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            [
                ChatRole::Human,
                ChatRole::Assistant,
                ChatRole::Human,
                ChatRole::Assistant
            ]
        );
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.entries()[2].content, "Thanks");
    }

    #[test]
    fn test_transcript_serializes_as_array() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("hi", "hello");

        let json = serde_json::to_string(&transcript).expect("serialize");
        assert_eq!(
            json,
            r#"[{"role":"human","content":"hi"},{"role":"assistant","content":"hello"}]"#
        );

        let back: Transcript = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, transcript);
    }
}
