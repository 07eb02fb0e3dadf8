//! Error types for the Groq API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Groq API.
#[derive(Debug, Error)]
pub enum GroqError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Groq API returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response had no assistant message.
    #[error("empty completion")]
    EmptyCompletion,

    /// Client could not be constructed.
    #[error("client configuration error: {0}")]
    Config(String),
}

/// API error response body (`{"error": {...}}`).
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error message.
    pub message: String,
    /// Error type.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_error_display() {
        let err = GroqError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = GroqError::Api {
            error_type: "invalid_request_error".to_string(),
            message: "model not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (invalid_request_error): model not found"
        );
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "message": "The model `llama9` does not exist",
                "type": "invalid_request_error",
                "code": "model_not_found"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            response.error.error_type.as_deref(),
            Some("invalid_request_error")
        );
        assert_eq!(response.error.code.as_deref(), Some("model_not_found"));
        assert!(response.error.message.contains("llama9"));
    }

    #[test]
    fn test_api_error_without_type() {
        let json = r#"{"error": {"message": "boom"}}"#;
        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.error.error_type.is_none());
    }
}
