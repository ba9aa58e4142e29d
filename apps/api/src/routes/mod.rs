pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::items::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/items/build", post(handlers::handle_build))
        .route("/api/v1/items/scores", post(handlers::handle_scores))
        .route("/api/v1/items/skills", post(handlers::handle_skills))
        .with_state(state)
}
