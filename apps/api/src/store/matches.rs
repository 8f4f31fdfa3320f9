use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_match::MatchRow;

/// Fields of a match about to be recorded.
pub struct NewMatch<'a> {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub score: i32,
    pub semantic_similarity: f64,
    pub skill_overlap: f64,
    pub missing_skills: &'a [String],
}

/// Match persistence. CRITICAL: this is append-only — `record` never updates
/// or deletes, and rerunning a batch appends fresh rows so history survives.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn record(&self, m: NewMatch<'_>) -> Result<Uuid, AppError>;

    /// All matches for a resume, ordered by score descending with ties broken
    /// by ascending job id for determinism. Zero matches is an empty vec, not
    /// an error; the HTTP layer decides whether that maps to 404.
    async fn list_by_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRow>, AppError>;
}

pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn record(&self, m: NewMatch<'_>) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO matches
                (id, resume_id, job_id, score, semantic_similarity, skill_overlap, missing_skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(m.resume_id)
        .bind(m.job_id)
        .bind(m.score)
        .bind(m.semantic_similarity)
        .bind(m.skill_overlap)
        .bind(m.missing_skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRow>, AppError> {
        Ok(sqlx::query_as::<_, MatchRow>(
            "SELECT * FROM matches WHERE resume_id = $1 ORDER BY score DESC, job_id ASC",
        )
        .bind(resume_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
