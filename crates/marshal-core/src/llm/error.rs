//! Language model error types

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while invoking a language model
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("API key not set: environment variable {0} is empty or missing")]
    MissingApiKey(String),

    #[error("No language model configured")]
    NotConfigured,
}

impl LlmError {
    /// Whether the failure happened before the model produced anything
    /// usable because the request never completed.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LlmError::ApiError {
            status: 401,
            message: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: bad key");

        let err = LlmError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Timeout after 30s");
    }

    #[test]
    fn test_is_transport() {
        assert!(LlmError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(!LlmError::InvalidResponse("empty".to_string()).is_transport());
        assert!(!LlmError::MissingApiKey("OPENAI_API_KEY".to_string()).is_transport());
    }
}
