//! Google Gemini model client.
//!
//! Calls `POST {base_url}/v1beta/models/{model}:generateContent` with the
//! system instruction and one user turn. Each attempt is bounded by the
//! configured timeout; retryable failures get `max_retries` extra attempts
//! with linear backoff.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::ModelConfig;
use super::{ChatModel, LlmError};
use crate::prompt::Prompt;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini REST client.
#[derive(Debug)]
pub struct GeminiModel {
    client: Client,
    config: ModelConfig,
}

impl GeminiModel {
    /// Builds the HTTP client. Fails on an empty key or a TLS backend that cannot initialize.
    pub fn new(config: ModelConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("Gemini API key is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_once(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &prompt.system,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: &prompt.user }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|env| env.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Gemini response parse error: {e}")))?;

        extract_text(data)
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.config.timeout)
        } else {
            // Reply text embeds this error; keep it free of the URL.
            LlmError::Request(e.without_url().to_string())
        }
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(data: GenerateResponse) -> Result<String, LlmError> {
    let text: String = data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        Err(LlmError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let attempts = self.config.max_retries + 1;
        let mut attempt = 1;

        loop {
            match self.generate_once(prompt).await {
                Ok(text) => {
                    debug!(model = %self.config.model, attempt, "gemini call succeeded");
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(model = %self.config.model, attempt, error = %e, "gemini call failed, retrying");
                    sleep(self.config.retry_backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
