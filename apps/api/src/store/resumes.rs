use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Resume persistence. Resumes are created on upload and never deleted by
/// this service; `save_embedding` backs the lazy at-most-once embedding
/// cache.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, text: &str, skills: &[String]) -> Result<ResumeRow, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;
    async fn list(&self) -> Result<Vec<ResumeRow>, AppError>;
    async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, text: &str, skills: &[String]) -> Result<ResumeRow, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes (id, text, skills) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(text)
        .bind(skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self) -> Result<Vec<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    /// Single UPDATE statement, so a concurrent reader sees either no vector
    /// or the whole vector — never a partial write.
    async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError> {
        sqlx::query("UPDATE resumes SET embedding = $2 WHERE id = $1")
            .bind(id)
            .bind(embedding)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
