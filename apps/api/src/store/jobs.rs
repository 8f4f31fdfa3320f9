use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::fetcher::IngestedJob;
use crate::models::job::JobRow;

/// Job persistence with dedup-on-write. Two ingested records carrying the
/// same external id must resolve to the same stored job; records without an
/// external id are always inserted fresh.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn ingest(&self, record: &IngestedJob) -> Result<JobRow, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError>;
    async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<JobRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE external_id = $1")
                .bind(external_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, record: &IngestedJob) -> Result<Option<JobRow>, AppError> {
        // The partial unique index on external_id is the actual dedup
        // guarantee; ON CONFLICT DO NOTHING turns a lost race into "no row
        // returned" instead of a constraint error.
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (id, external_id, title, company, description, posted_date, apply_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) WHERE external_id IS NOT NULL DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.external_id)
        .bind(&record.title)
        .bind(&record.company)
        .bind(&record.description)
        .bind(record.posted_date)
        .bind(&record.apply_url)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    /// Idempotent-by-identity ingestion: an already-stored external id returns
    /// the existing row unchanged, even when the incoming fields differ.
    async fn ingest(&self, record: &IngestedJob) -> Result<JobRow, AppError> {
        let Some(external_id) = record.external_id.as_deref() else {
            // No external identity — nothing to deduplicate against.
            return self.insert(record).await?.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("insert without external id returned no row"))
            });
        };

        if let Some(existing) = self.find_by_external_id(external_id).await? {
            return Ok(existing);
        }

        match self.insert(record).await? {
            Some(row) => Ok(row),
            // Lost the insert race: a concurrent ingest committed the same
            // external id first. Re-read the winner rather than erroring.
            None => self.find_by_external_id(external_id).await?.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "job '{external_id}' vanished after insert conflict"
                ))
            }),
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Single UPDATE statement; atomic relative to readers, same as resumes.
    async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError> {
        sqlx::query("UPDATE jobs SET embedding = $2 WHERE id = $1")
            .bind(id)
            .bind(embedding)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
