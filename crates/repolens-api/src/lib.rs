//! # repolens-api
//!
//! HTTP surface for repolens.
//!
//! - `GET /health` → `{ "ok": true }`
//! - `POST /analyze` with `{ "repoUrl", "lang" }` → canonical report, parsed
//!   sections and provenance. Generation failures degrade to a fallback
//!   report; only metadata failures and malformed requests are errors.

pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use services::{Analysis, AnalysisService, ReportSource};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    /// Cancelled when the server shuts down.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(analysis: AnalysisService) -> Self {
        Self {
            analysis: Arc::new(analysis),
            shutdown: CancellationToken::new(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
