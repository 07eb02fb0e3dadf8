//! Chat relay between the chatbot page and Groq.
//!
//! One turn:
//! 1. Build the request (system prompt, transcript, new input)
//! 2. Call Groq once
//! 3. On success, persist the pair to `chat_history` and extend the transcript
//!
//! Nothing is written when the call fails.

use askama::Template;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use dynamic_pricing_core::UserId;

use crate::db::{ChatRepository, RepositoryError};
use crate::groq::{GroqClient, GroqError, Message};
use crate::models::{ChatExchange, Transcript};

/// System prompt template for the pricing assistant.
#[derive(Template)]
#[template(path = "groq/system_prompt.txt")]
struct SystemPromptTemplate;

/// Render the system prompt template.
fn render_system_prompt() -> String {
    // Static template with no variables
    SystemPromptTemplate.render().unwrap_or_else(|_| {
        String::from("You are an AI Assistant for a dynamic pricing dashboard.")
    })
}

/// The only chat failure text users ever see.
pub const CHAT_UNAVAILABLE_MESSAGE: &str =
    "The AI assistant is unavailable right now. Please check the Groq API key and try again.";

/// Errors that can occur in the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key configured.
    #[error("chat assistant is not configured")]
    NotConfigured,

    /// Blank input.
    #[error("message is empty")]
    EmptyMessage,

    /// Groq API error.
    #[error("Groq API error: {0}")]
    Groq(#[from] GroqError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),
}

/// Chat service.
pub struct ChatService<'a> {
    pool: &'a SqlitePool,
    groq: Option<&'a GroqClient>,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service. `groq` is `None` when no API key is configured.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, groq: Option<&'a GroqClient>) -> Self {
        Self { pool, groq }
    }

    /// Send one message and return the assistant's reply.
    ///
    /// `transcript` is only extended after the reply has been stored.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank input, `ChatError::NotConfigured`
    /// without an API key, and `ChatError::Groq`/`ChatError::Database` when the
    /// call or the insert fails.
    #[instrument(skip(self, transcript, input), fields(user_id = %user_id, turns = transcript.len() / 2))]
    pub async fn send(
        &self,
        user_id: UserId,
        transcript: &mut Transcript,
        input: &str,
    ) -> Result<String, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let groq = self.groq.ok_or(ChatError::NotConfigured)?;

        let reply = groq.complete(build_messages(transcript, input)).await?;

        ChatRepository::new(self.pool)
            .save_exchange(user_id, input, &reply)
            .await?;
        transcript.push_exchange(input, reply.clone());

        info!("Chat exchange stored");
        Ok(reply)
    }

    /// Persisted exchanges for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Database` if the query fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<ChatExchange>, ChatError> {
        Ok(ChatRepository::new(self.pool).history(user_id).await?)
    }
}

/// System prompt, then the transcript in order, then the new input.
fn build_messages(transcript: &Transcript, input: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(Message::system(render_system_prompt()));
    messages.extend(transcript.entries().iter().map(|entry| Message {
        role: entry.role.into(),
        content: entry.content.clone(),
    }));
    messages.push(Message::user(input));
    messages
}
