use std::sync::Arc;

use crate::ingest::fetcher::JobFeed;
use crate::matching::engine::MatchingEngine;
use crate::store::jobs::JobStore;
use crate::store::matches::MatchStore;
use crate::store::resumes::ResumeStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every collaborator sits behind a trait object so tests (and
/// future backends) can swap implementations without touching handlers.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn JobFeed>,
    pub resumes: Arc<dyn ResumeStore>,
    pub jobs: Arc<dyn JobStore>,
    pub matches: Arc<dyn MatchStore>,
    pub engine: MatchingEngine,
}
