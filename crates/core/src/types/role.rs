//! Chat role enum.

use serde::{Deserialize, Serialize};

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// The logged-in user.
    Human,
    /// The language model.
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ChatRole::Human.to_string(), "human");
        assert_eq!(ChatRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ChatRole::Human).expect("serialize");
        assert_eq!(json, "\"human\"");
        let role: ChatRole = serde_json::from_str("\"assistant\"").expect("deserialize");
        assert_eq!(role, ChatRole::Assistant);
    }
}
