//! docsift-server - HTTP upload endpoint for docsift.
//!
//! Accepts a multipart upload and returns the extracted text, warnings and
//! metadata as JSON.
//!
//! # Example
//!
//! ```ignore
//! use docsift_server::{create_server, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_env();
//!     let state = AppState::new(&config.extraction, config.openai_api_key.clone());
//!     let app = create_server(state, &config);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, config: &ServerConfig) -> Router {
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer(&config.allowed_origins))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
