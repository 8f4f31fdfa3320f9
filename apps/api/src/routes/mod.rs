pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ingest;
use crate::matching;
use crate::resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(resume::handlers::handle_upload_resume))
        .route(
            "/api/v1/resumes/:id/matches",
            get(matching::handlers::handle_get_matches),
        )
        .route("/api/v1/jobs/fetch", post(ingest::handlers::handle_fetch_jobs))
        .route("/api/v1/match/run", post(matching::handlers::handle_match_ad_hoc))
        .with_state(state)
}
