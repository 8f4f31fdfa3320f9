use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. `skills` holds case-normalized skill tokens; `embedding`
/// is populated lazily the first time the matching engine needs it and then
/// reused indefinitely. Resumes are never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub text: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}
