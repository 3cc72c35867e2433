//! Route definitions for the REST API.

mod extract;
mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Request header carrying a per-call OCR/transcription key.
pub const API_KEY_HEADER: &str = "x-openai-key";

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/extract", post(extract::extract_file))
        .with_state(state)
}

pub use extract::*;
pub use health::*;
