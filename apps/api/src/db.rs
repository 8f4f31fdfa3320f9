use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the resume/job/match tables and their indexes if they do not
/// already exist. Called exactly once from `main` at process startup —
/// storage is never initialized as a side effect of loading a module.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized");
    Ok(())
}

// Jobs are unique on external_id when one is present; records without an
// external id are never deduplicated, hence the partial index. Matches are
// append-only and indexed for the per-resume and per-job listing queries.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id UUID PRIMARY KEY,
        text TEXT NOT NULL,
        skills TEXT[] NOT NULL DEFAULT '{}',
        embedding REAL[],
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id UUID PRIMARY KEY,
        external_id TEXT,
        title TEXT NOT NULL,
        company TEXT,
        description TEXT NOT NULL,
        posted_date TIMESTAMPTZ,
        apply_url TEXT,
        embedding REAL[],
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS jobs_external_id_key
        ON jobs (external_id) WHERE external_id IS NOT NULL
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id UUID PRIMARY KEY,
        resume_id UUID NOT NULL REFERENCES resumes(id),
        job_id UUID NOT NULL REFERENCES jobs(id),
        score INTEGER NOT NULL,
        semantic_similarity DOUBLE PRECISION NOT NULL,
        skill_overlap DOUBLE PRECISION NOT NULL,
        missing_skills TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS matches_resume_id_idx ON matches (resume_id)",
    "CREATE INDEX IF NOT EXISTS matches_job_id_idx ON matches (job_id)",
];
