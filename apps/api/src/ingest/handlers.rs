use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchJobsRequest {
    pub roles: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchJobsResponse {
    pub jobs_fetched: usize,
}

/// POST /api/v1/jobs/fetch
///
/// Fetches postings from the listings feed, ingests them with dedup, then
/// runs a persisted matching batch against every stored resume. A feed
/// failure degrades to an empty batch (`jobs_fetched: 0`) instead of failing
/// the request; per-pair scoring failures are logged and do not abort their
/// siblings.
pub async fn handle_fetch_jobs(
    State(state): State<AppState>,
    Json(req): Json<FetchJobsRequest>,
) -> Result<Json<FetchJobsResponse>, AppError> {
    if req.roles.is_empty() || req.roles.iter().any(|r| r.trim().is_empty()) {
        return Err(AppError::UnsupportedInput(
            "at least one non-empty role keyword is required".to_string(),
        ));
    }

    let fetched = match state.feed.fetch(&req.roles, &req.companies).await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("Listings fetch failed, continuing with an empty batch: {e}");
            Vec::new()
        }
    };

    let mut stored: Vec<JobRow> = Vec::with_capacity(fetched.len());
    for record in &fetched {
        stored.push(state.jobs.ingest(record).await?);
    }

    let resumes = state.resumes.list().await?;
    let outcome = state.engine.run_batch(&stored, &resumes, Utc::now()).await;

    if outcome.failed.is_empty() {
        info!(
            "Matched {} pairs across {} resumes and {} jobs",
            outcome.pairs_scored,
            resumes.len(),
            stored.len()
        );
    } else {
        warn!(
            "Matched {} pairs, {} failed",
            outcome.pairs_scored,
            outcome.failed.len()
        );
        for failure in &outcome.failed {
            warn!(
                "Pair failed: resume {} / job {}: {}",
                failure.resume_id, failure.job_id, failure.error
            );
        }
    }

    Ok(Json(FetchJobsResponse {
        jobs_fetched: fetched.len(),
    }))
}
