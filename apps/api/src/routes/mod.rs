pub mod health;
pub mod jobs;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job listing API
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/all", get(jobs::handle_all_jobs))
        .route("/api/v1/jobs/remote", get(jobs::handle_remote_jobs))
        .route("/api/v1/jobs/load-more", get(jobs::handle_load_more))
        .with_state(state)
}
