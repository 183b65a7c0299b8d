pub mod candidate_routes;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/health", get(health::health))
        .route("/upload-cv", post(candidate_routes::upload_cv))
        .route(
            "/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(candidate_routes::get_candidate).put(candidate_routes::update_candidate),
        )
        .with_state(state)
}
