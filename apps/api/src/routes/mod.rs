pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;
use crate::visits;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/extract",
            post(handlers::handle_extract_resume),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/visits", post(visits::handle_record_visit))
        .with_state(state)
}
