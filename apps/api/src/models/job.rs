use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored job posting. `external_id` is the upstream listing identifier,
/// unique across all jobs when present; records without one are never
/// deduplicated. `embedding` follows the same lazy-once policy as resumes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub company: Option<String>,
    pub description: String,
    pub posted_date: Option<DateTime<Utc>>,
    pub apply_url: Option<String>,
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}
