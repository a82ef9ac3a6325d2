//! Model client abstraction.
//!
//! The chat service only sees [`ChatModel`]; the Gemini REST client and the
//! fake used in tests both implement it.
//!
//! # Providers
//!
//! - [`GeminiModel`] — Google Gemini `generateContent` with timeout and bounded retry
//! - [`FakeModel`] — canned replies or failures, records the prompts it saw

pub mod config;
pub mod fake;
pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::Prompt;

pub use config::ModelConfig;
pub use fake::FakeModel;
pub use gemini::GeminiModel;

/// Errors from a model call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Request(_) | LlmError::Timeout(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::NotConfigured(_) | LlmError::Parse(_) | LlmError::EmptyResponse => false,
        }
    }
}

/// A model that turns a rendered prompt into generated text.
#[async_trait]
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    /// Sends the prompt and returns the raw generated text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_retryable() {
        assert!(LlmError::Request("connection reset".into()).is_retryable());
        assert!(LlmError::Timeout(std::time::Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn throttling_and_server_errors_are_retryable() {
        let throttled = LlmError::Api { status: 429, message: "quota".into() };
        let unavailable = LlmError::Api { status: 503, message: "overloaded".into() };
        assert!(throttled.is_retryable());
        assert!(unavailable.is_retryable());
    }

    #[test]
    fn client_errors_are_final() {
        let bad_key = LlmError::Api { status: 403, message: "API key not valid".into() };
        assert!(!bad_key.is_retryable());
        assert!(!LlmError::Parse("eof".into()).is_retryable());
        assert!(!LlmError::EmptyResponse.is_retryable());
    }
}
