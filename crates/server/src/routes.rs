use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use service::submissions::SubmissionService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod submissions;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionService>,
}

impl AppState {
    pub fn new(submissions: SubmissionService) -> Self {
        Self { submissions: Arc::new(submissions) }
    }
}

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/ping", get(submissions::ping))
        .route("/submit", post(submissions::submit))
        .route("/read", get(submissions::read))
        .route("/delete", delete(submissions::delete_submission))
        .route("/edit", put(submissions::edit))
        .route("/search", get(submissions::search))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
