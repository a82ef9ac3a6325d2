//! # cheerbot_api
//!
//! HTTP API library for Cheerbot.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use cheerbot_core::chat::ChatService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::error;

use crate::error::AppError;
use crate::handlers::{chat, health, mood};

pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/health";
pub const MOOD_ENCOURAGEMENT_PATH: &str = "/api/mood-encouragement";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat service, built once before the listener starts.
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // The browser frontend is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route(CHAT_PATH, post(chat::chat_handler))
        .route(HEALTH_PATH, get(health::health_handler))
        .route(
            MOOD_ENCOURAGEMENT_PATH,
            post(mood::mood_encouragement_handler),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

/// Maps a handler panic to `500 {error, success: false}`.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%details, "handler panicked");
    AppError::Internal(details).into_response()
}
