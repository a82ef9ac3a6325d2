//! Request and response bodies.

use std::borrow::Cow;

use cheerbot_core::chat::DEFAULT_TONE;
use cheerbot_core::mood::{DEFAULT_MOOD, Mood};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `POST /api/chat` body. Absent and `null` fields are treated alike.
///
/// `tone` and `mood` only reach the log, so any JSON value is accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tone: Option<Value>,
    #[serde(default)]
    pub mood: Option<Value>,
}

impl ChatRequest {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn tone(&self) -> Cow<'_, str> {
        label(self.tone.as_ref(), DEFAULT_TONE)
    }

    pub fn mood(&self) -> Cow<'_, str> {
        label(self.mood.as_ref(), DEFAULT_MOOD)
    }
}

fn label<'a>(value: Option<&'a Value>, default: &'static str) -> Cow<'a, str> {
    match value {
        None => Cow::Borrowed(default),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// `POST /api/mood-encouragement` body.
///
/// An absent `mood` means [`DEFAULT_MOOD`]; an explicit `null` or any
/// non-string value resolves to [`Mood::Neutral`].
#[derive(Debug, Default, Deserialize)]
pub struct MoodRequest {
    #[serde(default, deserialize_with = "present")]
    pub mood: Option<Value>,
}

impl MoodRequest {
    pub fn mood(&self) -> Mood {
        match &self.mood {
            None => Mood::from_key(DEFAULT_MOOD),
            Some(Value::String(key)) => Mood::from_key(key),
            Some(_) => Mood::Neutral,
        }
    }
}

/// Keeps a present `null` as `Some(Value::Null)` instead of collapsing it.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Successful reply shared by chat and encouragement.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub response: String,
    pub success: bool,
}

impl ReplyResponse {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            success: true,
        }
    }
}

/// Error body, always `success: false`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

/// `GET /api/health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
