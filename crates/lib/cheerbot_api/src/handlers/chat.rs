//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ReplyResponse};

/// Error text for an empty or missing message.
pub const EMPTY_MESSAGE: &str = "Message vide";

/// `POST /api/chat` — forward one message to the model and return its reply.
///
/// Model failures and an uninitialized service still answer 200; only a bad
/// request body is an error here.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ReplyResponse>> {
    let Json(req) = payload?;

    let message = req.message();
    if message.is_empty() {
        return Err(AppError::Validation(EMPTY_MESSAGE.into()));
    }

    info!(
        tone = %req.tone(),
        mood = %req.mood(),
        chars = message.chars().count(),
        "chat message received"
    );

    let reply = state.chat.respond(message).await;
    Ok(Json(ReplyResponse::ok(reply)))
}
