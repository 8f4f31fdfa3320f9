mod config;
mod db;
mod embedding;
mod errors;
mod ingest;
mod matching;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::embedding::{Embedder, HttpEmbedder};
use crate::ingest::fetcher::{AdzunaFeed, JobFeed};
use crate::matching::engine::MatchingEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::jobs::{JobStore, PgJobStore};
use crate::store::matches::{MatchStore, PgMatchStore};
use crate::store::resumes::{PgResumeStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL; schema setup is an explicit startup step, never
    // an import side effect.
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    // Initialize the embedding client
    let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(
        config.embedding_api_url.clone(),
        config.embedding_api_key.clone(),
    ));
    info!(
        "Embedding client initialized (model: {})",
        embedding::EMBEDDING_MODEL
    );

    // Initialize the listings feed (falls back to mocked data without creds)
    let feed: Arc<dyn JobFeed> = Arc::new(AdzunaFeed::new(
        config.adzuna_app_id.clone(),
        config.adzuna_app_key.clone(),
    ));

    // Stores
    let resumes: Arc<dyn ResumeStore> = Arc::new(PgResumeStore::new(pool.clone()));
    let jobs: Arc<dyn JobStore> = Arc::new(PgJobStore::new(pool.clone()));
    let matches: Arc<dyn MatchStore> = Arc::new(PgMatchStore::new(pool));

    // The matching engine owns no state of its own — everything durable
    // lives in the stores and the per-entity embedding caches.
    let engine = MatchingEngine::new(
        embedder,
        resumes.clone(),
        jobs.clone(),
        matches.clone(),
    );

    let state = AppState {
        feed,
        resumes,
        jobs,
        matches,
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
