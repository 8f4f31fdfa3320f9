use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::RankedResult;
use crate::resume::parser::Seniority;
use crate::state::AppState;

/// The parsed-resume record for a one-shot match, plus optional role/company
/// filters used to pull the candidate list from the listings feed.
#[derive(Debug, Deserialize)]
pub struct AdHocMatchRequest {
    pub text: String,
    pub skills: Vec<String>,
    // Carried by the parsed-resume record for completeness; scoring does not
    // consume either field.
    #[allow(dead_code)]
    pub experience_years: u32,
    #[allow(dead_code)]
    pub seniority: Seniority,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AdHocMatchResponse {
    pub matches: Vec<RankedResult>,
}

/// POST /api/v1/match/run
///
/// Scores the supplied resume against a freshly fetched, non-stored candidate
/// list. Nothing is persisted — not the resume, not the candidates, not the
/// scores.
pub async fn handle_match_ad_hoc(
    State(state): State<AppState>,
    Json(req): Json<AdHocMatchRequest>,
) -> Result<Json<AdHocMatchResponse>, AppError> {
    let candidates = match state.feed.fetch(&req.roles, &req.companies).await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("Listings fetch failed, matching against an empty candidate list: {e}");
            Vec::new()
        }
    };

    let skills: Vec<String> = req.skills.iter().map(|s| s.to_lowercase()).collect();
    let matches = state
        .engine
        .match_ad_hoc(&req.text, &skills, &candidates)
        .await?;

    Ok(Json(AdHocMatchResponse { matches }))
}

#[derive(Debug, Serialize)]
pub struct StoredMatch {
    pub title: String,
    pub company: Option<String>,
    pub score: i32,
    pub missing_skills: Vec<String>,
    pub apply_url: Option<String>,
}

/// GET /api/v1/resumes/:id/matches
///
/// Stored matches for a resume, highest score first. 404 when the resume is
/// unknown or when nothing has been matched for it yet.
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StoredMatch>>, AppError> {
    state
        .resumes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let rows = state.matches.list_by_resume(id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(format!(
            "No matches recorded for resume {id}"
        )));
    }

    let mut results = Vec::with_capacity(rows.len());
    for m in rows {
        // Jobs are never deleted, so a match always has its job; a missing
        // row here means the store is corrupt.
        let job = state.jobs.get(m.job_id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("job {} missing for match {}", m.job_id, m.id))
        })?;

        results.push(StoredMatch {
            title: job.title,
            company: job.company,
            score: m.score,
            missing_skills: m.missing_skills,
            apply_url: job.apply_url,
        });
    }

    Ok(Json(results))
}
