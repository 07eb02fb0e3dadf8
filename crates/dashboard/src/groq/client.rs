//! Groq API client for chat completions.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GroqConfig;

use super::error::{ApiErrorResponse, GroqError};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

/// Sampling temperature; answers should be deterministic.
const TEMPERATURE: f32 = 0.0;

/// Groq API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GroqClient {
    inner: Arc<GroqClientInner>,
}

struct GroqClientInner {
    client: reqwest::Client,
    model: String,
    completions_url: String,
}

impl GroqClient {
    /// Create a new Groq client.
    ///
    /// # Errors
    ///
    /// Returns `GroqError::Config` if the API key contains characters that
    /// are not valid in an HTTP header, or `GroqError::Http` if the
    /// underlying client cannot be built.
    pub fn new(config: &GroqConfig) -> Result<Self, GroqError> {
        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_value = HeaderValue::from_str(&bearer)
            .map_err(|_| GroqError::Config("API key is not a valid header value".to_string()))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GroqClientInner {
                client,
                model: config.model.clone(),
                completions_url: format!("{}/chat/completions", config.base_url),
            }),
        })
    }

    /// Send a chat-completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error response.
    #[instrument(skip(self, messages), fields(model = %self.inner.model, messages = messages.len()))]
    pub async fn chat(&self, messages: Vec<Message>) -> Result<ChatCompletionResponse, GroqError> {
        let request = ChatCompletionRequest {
            model: self.inner.model.clone(),
            messages,
            temperature: TEMPERATURE,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.completions_url)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Send a chat-completion request and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns `GroqError::EmptyCompletion` if the response has no choices,
    /// or any error from [`Self::chat`].
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String, GroqError> {
        let response = self.chat(messages).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Groq completion"
            );
        }

        response
            .first_content()
            .map(str::to_owned)
            .ok_or(GroqError::EmptyCompletion)
    }

    /// Handle a response, successful or not.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatCompletionResponse, GroqError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GroqError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GroqError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GroqError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return GroqError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    GroqError::Api {
                        error_type: api_error
                            .error
                            .error_type
                            .unwrap_or_else(|| status.to_string()),
                        message: api_error.error.message,
                    }
                } else {
                    GroqError::Api {
                        error_type: status.to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => GroqError::Http(e),
        }
    }
}
