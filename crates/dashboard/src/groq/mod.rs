//! Groq API integration for the chat assistant.
//!
//! Groq exposes an OpenAI-compatible chat-completions endpoint. The client
//! sends one non-streaming request per chat turn with a fixed model and
//! temperature 0; there is no retry or fallback model.

mod client;
mod error;
mod types;

pub use client::GroqClient;
pub use error::{ApiError, ApiErrorResponse, GroqError};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message, Role, Usage};
