//! REST API endpoints.
//!
//! Axum-based HTTP API serving the derived result objects: leaderboards,
//! player summaries, per-test boards and record categories. The rendering
//! layer consumes these as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::meta::health))
        .route("/api/leaderboards/accuracy", get(routes::boards::accuracy))
        .route("/api/leaderboards/streaks", get(routes::boards::streaks))
        .route("/api/leaderboards/aggregate", get(routes::boards::aggregate))
        .route(
            "/api/leaderboards/high-scores",
            get(routes::boards::high_scores),
        )
        .route("/api/records", get(routes::records::list_categories))
        .route("/api/records/:category", get(routes::records::category_board))
        .route("/api/tests", get(routes::tests::list_tests))
        .route("/api/tests/:test_id", get(routes::tests::overview))
        .route(
            "/api/tests/:test_id/leaderboard",
            get(routes::tests::board),
        )
        .route("/api/players/:identity", get(routes::players::summary))
        .route(
            "/api/players/:identity/unplayed",
            get(routes::players::unplayed),
        )
        .route(
            "/api/players/:identity/tests/:test_id",
            get(routes::players::test_comparison),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
