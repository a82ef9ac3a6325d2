//! Fake model for tests.
//!
//! Returns a canned reply or a canned failure without touching the network,
//! and records every prompt it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatModel, LlmError};
use crate::prompt::Prompt;

#[derive(Debug)]
enum Outcome {
    Reply(String),
    Fail(String),
}

/// A fake [`ChatModel`].
#[derive(Debug)]
pub struct FakeModel {
    outcome: Outcome,
    prompts: Mutex<Vec<Prompt>>,
}

impl FakeModel {
    /// Always answers with `text`, verbatim.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a request error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, oldest first.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        if let Ok(mut seen) = self.prompts.lock() {
            seen.push(prompt.clone());
        }
        match &self.outcome {
            Outcome::Reply(text) => Ok(text.clone()),
            Outcome::Fail(message) => Err(LlmError::Request(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}
