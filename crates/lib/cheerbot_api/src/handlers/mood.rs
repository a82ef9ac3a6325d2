//! Mood encouragement handler.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use cheerbot_core::mood;
use tracing::debug;

use crate::error::AppResult;
use crate::models::{MoodRequest, ReplyResponse};

/// `POST /api/mood-encouragement` — random encouragement for the given mood.
pub async fn mood_encouragement_handler(
    payload: Result<Json<MoodRequest>, JsonRejection>,
) -> AppResult<Json<ReplyResponse>> {
    let Json(req) = payload?;
    let resolved = req.mood();
    debug!(requested = ?req.mood, resolved = resolved.key(), "mood encouragement");
    Ok(Json(ReplyResponse::ok(mood::encouragement(resolved))))
}
