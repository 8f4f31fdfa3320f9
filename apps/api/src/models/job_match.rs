use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One scored (resume, job) evaluation. Match rows are append-only: rerunning
/// a batch for the same pair inserts a new row rather than updating the old
/// one, so scoring history is preserved even after a resume or job goes away.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    /// Final combined score as an integer percentage in [0, 100].
    pub score: i32,
    pub semantic_similarity: f64,
    pub skill_overlap: f64,
    pub missing_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}
