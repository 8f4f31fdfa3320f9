//! Matching engine — composes the embedder, the scorers, and the stores to
//! run persisted batch evaluations and one-shot ad-hoc rankings.
//!
//! The engine itself is stateless between calls: all durable state lives in
//! the stores and in the per-entity embedding caches.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::embedding::{cosine_similarity, Embedder};
use crate::errors::AppError;
use crate::ingest::fetcher::IngestedJob;
use crate::matching::combine::{score_percent, ScoreMode};
use crate::matching::overlap::{derive_job_skills, missing_skills, skill_overlap};
use crate::matching::recency::recency_bonus;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::store::jobs::JobStore;
use crate::store::matches::{MatchStore, NewMatch};
use crate::store::resumes::ResumeStore;

/// One ranked entry returned by an ad-hoc match (and, shape-wise, by the
/// stored-matches listing).
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub title: String,
    pub company: Option<String>,
    pub score: i32,
    pub missing_skills: Vec<String>,
    pub apply_url: Option<String>,
}

/// A (resume, job) pair that could not be scored. Failures are isolated:
/// sibling pairs in the same batch proceed normally.
#[derive(Debug)]
pub struct PairFailure {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub pairs_scored: usize,
    pub failed: Vec<PairFailure>,
}

#[derive(Clone)]
pub struct MatchingEngine {
    embedder: Arc<dyn Embedder>,
    resumes: Arc<dyn ResumeStore>,
    jobs: Arc<dyn JobStore>,
    matches: Arc<dyn MatchStore>,
}

impl MatchingEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        resumes: Arc<dyn ResumeStore>,
        jobs: Arc<dyn JobStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Self {
        Self {
            embedder,
            resumes,
            jobs,
            matches,
        }
    }

    /// Scores every (resume, job) pair with persisted-batch weights and
    /// appends one match row each. Iteration is resume-major with jobs in
    /// ascending id order, so a rerun appends rows in a reproducible
    /// sequence. A failed pair is recorded in the outcome and does not abort
    /// its siblings.
    pub async fn run_batch(
        &self,
        jobs: &[JobRow],
        resumes: &[ResumeRow],
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut ordered: Vec<&JobRow> = jobs.iter().collect();
        ordered.sort_by_key(|j| j.id);

        let mut outcome = BatchOutcome::default();
        // Job vectors are shared across every resume in the batch; memoize so
        // each job text is embedded at most once per run.
        let mut job_vectors: HashMap<Uuid, Vec<f32>> = HashMap::new();

        for resume in resumes {
            let resume_vector = match self.resume_embedding(resume).await {
                Ok(v) => v,
                Err(e) => {
                    warn!("Embedding failed for resume {}: {e}", resume.id);
                    for job in &ordered {
                        outcome.failed.push(PairFailure {
                            resume_id: resume.id,
                            job_id: job.id,
                            error: e.to_string(),
                        });
                    }
                    continue;
                }
            };

            for job in &ordered {
                let result = self
                    .score_and_record(resume, &resume_vector, job, &mut job_vectors, now)
                    .await;
                match result {
                    Ok(()) => outcome.pairs_scored += 1,
                    Err(e) => {
                        warn!("Match failed for resume {} / job {}: {e}", resume.id, job.id);
                        outcome.failed.push(PairFailure {
                            resume_id: resume.id,
                            job_id: job.id,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        outcome
    }

    /// Scores a resume against a caller-supplied candidate list without
    /// touching any store. Results come back sorted by score descending;
    /// the sort is stable, so ties keep their original list position.
    pub async fn match_ad_hoc(
        &self,
        resume_text: &str,
        resume_skills: &[String],
        candidates: &[IngestedJob],
    ) -> Result<Vec<RankedResult>, AppError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let resume_vector = self.embedder.embed(resume_text).await?;

        let mut ranked = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let candidate_vector = self.embedder.embed(&candidate.description).await?;
            let semantic = f64::from(cosine_similarity(&resume_vector, &candidate_vector)?);

            let job_skills = derive_job_skills(&candidate.description, resume_skills);
            let overlap = skill_overlap(resume_skills, &job_skills);
            let score = score_percent(ScoreMode::AdHoc.combine(semantic, overlap, 0.0));

            ranked.push(RankedResult {
                title: candidate.title.clone(),
                company: candidate.company.clone(),
                score,
                missing_skills: missing_skills(&job_skills, resume_skills),
                apply_url: candidate.apply_url.clone(),
            });
        }

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(ranked)
    }

    /// Returns the resume's cached vector, embedding and persisting it on
    /// first use. Computed at most once per entity; a concurrent duplicate
    /// computation is tolerable because the write is a single atomic UPDATE
    /// of the full vector.
    async fn resume_embedding(&self, resume: &ResumeRow) -> Result<Vec<f32>, AppError> {
        if let Some(vector) = &resume.embedding {
            return Ok(vector.clone());
        }

        debug!("Embedding resume {} for the first time", resume.id);
        let vector = self.embedder.embed(&resume.text).await?;
        self.resumes.save_embedding(resume.id, &vector).await?;
        Ok(vector)
    }

    async fn job_embedding(&self, job: &JobRow) -> Result<Vec<f32>, AppError> {
        if let Some(vector) = &job.embedding {
            return Ok(vector.clone());
        }

        debug!("Embedding job {} for the first time", job.id);
        let vector = self.embedder.embed(&job.description).await?;
        self.jobs.save_embedding(job.id, &vector).await?;
        Ok(vector)
    }

    async fn score_and_record(
        &self,
        resume: &ResumeRow,
        resume_vector: &[f32],
        job: &JobRow,
        job_vectors: &mut HashMap<Uuid, Vec<f32>>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let job_vector = match job_vectors.get(&job.id) {
            Some(v) => v.clone(),
            None => {
                let v = self.job_embedding(job).await?;
                job_vectors.insert(job.id, v.clone());
                v
            }
        };

        let semantic = f64::from(cosine_similarity(resume_vector, &job_vector)?);

        let job_skills = derive_job_skills(&job.description, &resume.skills);
        let overlap = skill_overlap(&resume.skills, &job_skills);
        let missing = missing_skills(&job_skills, &resume.skills);
        let recency = recency_bonus(job.posted_date, now);

        let score = score_percent(ScoreMode::PersistedBatch.combine(semantic, overlap, recency));

        self.matches
            .record(NewMatch {
                resume_id: resume.id,
                job_id: job.id,
                score,
                semantic_similarity: semantic,
                skill_overlap: overlap,
                missing_skills: &missing,
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingError;
    use crate::models::job_match::MatchRow;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // ── Test doubles ────────────────────────────────────────────────────────

    /// Embedder stub: fixed vectors per text, call counting, optional
    /// per-text failure injection. Unknown texts embed to [1, 0].
    struct StubEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
        fail_on: Option<String>,
    }

    impl StubEmbedder {
        fn new(fixtures: &[(&str, &[f32])]) -> Self {
            Self {
                vectors: fixtures
                    .iter()
                    .map(|(text, v)| (text.to_string(), v.to_vec()))
                    .collect(),
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(mut self, text: &str) -> Self {
            self.fail_on = Some(text.to_string());
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(text) {
                return Err(EmbeddingError::Api {
                    status: 503,
                    message: "model offline".to_string(),
                });
            }
            Ok(self
                .vectors
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![1.0, 0.0]))
        }
    }

    #[derive(Default)]
    struct MemResumeStore {
        rows: Mutex<Vec<ResumeRow>>,
    }

    #[async_trait]
    impl ResumeStore for MemResumeStore {
        async fn insert(&self, text: &str, skills: &[String]) -> Result<ResumeRow, AppError> {
            let row = ResumeRow {
                id: Uuid::new_v4(),
                text: text.to_string(),
                skills: skills.to_vec(),
                embedding: None,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<ResumeRow>, AppError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
                row.embedding = Some(embedding.to_vec());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemJobStore {
        rows: Mutex<Vec<JobRow>>,
    }

    #[async_trait]
    impl JobStore for MemJobStore {
        async fn ingest(&self, record: &IngestedJob) -> Result<JobRow, AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(external_id) = &record.external_id {
                if let Some(existing) = rows
                    .iter()
                    .find(|j| j.external_id.as_ref() == Some(external_id))
                {
                    return Ok(existing.clone());
                }
            }
            let row = JobRow {
                id: Uuid::new_v4(),
                external_id: record.external_id.clone(),
                title: record.title.clone(),
                company: record.company.clone(),
                description: record.description.clone(),
                posted_date: record.posted_date,
                apply_url: record.apply_url.clone(),
                embedding: None,
                created_at: Utc::now(),
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
            Ok(self.rows.lock().unwrap().iter().find(|j| j.id == id).cloned())
        }

        async fn save_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<(), AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|j| j.id == id) {
                row.embedding = Some(embedding.to_vec());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemMatchStore {
        rows: Mutex<Vec<MatchRow>>,
    }

    impl MemMatchStore {
        fn recorded(&self) -> Vec<MatchRow> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MatchStore for MemMatchStore {
        async fn record(&self, m: NewMatch<'_>) -> Result<Uuid, AppError> {
            let id = Uuid::new_v4();
            self.rows.lock().unwrap().push(MatchRow {
                id,
                resume_id: m.resume_id,
                job_id: m.job_id,
                score: m.score,
                semantic_similarity: m.semantic_similarity,
                skill_overlap: m.skill_overlap,
                missing_skills: m.missing_skills.to_vec(),
                created_at: Utc::now(),
            });
            Ok(id)
        }

        async fn list_by_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRow>, AppError> {
            let mut rows: Vec<MatchRow> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.resume_id == resume_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.job_id.cmp(&b.job_id)));
            Ok(rows)
        }
    }

    // ── Fixtures ────────────────────────────────────────────────────────────

    fn now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn resume(text: &str, skills: &[&str]) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            text: text.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            embedding: None,
            created_at: now(),
        }
    }

    fn fresh_job(id: Uuid, description: &str) -> JobRow {
        JobRow {
            id,
            external_id: Some(format!("ext-{id}")),
            title: "Backend Developer".to_string(),
            company: Some("Amazon".to_string()),
            description: description.to_string(),
            posted_date: Some(now()),
            apply_url: Some("https://example.com/apply/1".to_string()),
            embedding: None,
            created_at: now(),
        }
    }

    fn engine(
        embedder: Arc<StubEmbedder>,
    ) -> (
        MatchingEngine,
        Arc<MemResumeStore>,
        Arc<MemJobStore>,
        Arc<MemMatchStore>,
    ) {
        let resumes = Arc::new(MemResumeStore::default());
        let jobs = Arc::new(MemJobStore::default());
        let matches = Arc::new(MemMatchStore::default());
        let engine = MatchingEngine::new(
            embedder,
            resumes.clone(),
            jobs.clone(),
            matches.clone(),
        );
        (engine, resumes, jobs, matches)
    }

    fn candidate(title: &str, description: &str) -> IngestedJob {
        IngestedJob {
            external_id: None,
            title: title.to_string(),
            company: None,
            description: description.to_string(),
            posted_date: None,
            apply_url: None,
        }
    }

    // ── Batch matching ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_batch_scores_match_the_formula() {
        // semantic 0.28 (unit vectors), overlap 0.5 (one of two skills in the
        // description), recency 1.0 (posted today):
        // 0.65·0.28 + 0.25·0.5 + 0.10·1.0 = 0.407 → 41
        let embedder = Arc::new(StubEmbedder::new(&[
            ("resume text", &[1.0, 0.0]),
            ("python docker kubernetes", &[0.28, 0.96]),
        ]));
        let (engine, _, _, matches) = engine(embedder);

        let r = resume("resume text", &["python", "sql"]);
        let j = fresh_job(Uuid::new_v4(), "python docker kubernetes");

        let outcome = engine.run_batch(&[j.clone()], &[r.clone()], now()).await;

        assert_eq!(outcome.pairs_scored, 1);
        assert!(outcome.failed.is_empty());

        let recorded = matches.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].resume_id, r.id);
        assert_eq!(recorded[0].job_id, j.id);
        assert_eq!(recorded[0].score, 41);
        assert!((recorded[0].semantic_similarity - 0.28).abs() < 1e-6);
        assert!((recorded[0].skill_overlap - 0.5).abs() < 1e-9);
        assert!(recorded[0].missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_batch_end_to_end_full_overlap() {
        let embedder = Arc::new(StubEmbedder::new(&[
            ("resume text", &[1.0, 0.0]),
            ("python sql docker", &[0.8, 0.6]),
        ]));
        let (engine, _, _, matches) = engine(embedder);

        let r = resume("resume text", &["python", "sql"]);
        let j = fresh_job(Uuid::new_v4(), "python sql docker");

        engine.run_batch(&[j], &[r], now()).await;

        // overlap 1.0: both claimed skills appear in the description.
        // 0.65·0.8 + 0.25·1.0 + 0.10·1.0 = 0.87 → 87
        let recorded = matches.recorded();
        assert_eq!(recorded[0].score, 87);
        assert_eq!(recorded[0].skill_overlap, 1.0);
        assert!(recorded[0].missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_batch_appends_in_ascending_job_id_order() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, _, _, matches) = engine(embedder);

        let low = fresh_job(Uuid::from_u128(1), "alpha");
        let high = fresh_job(Uuid::from_u128(2), "beta");
        let r = resume("resume text", &[]);

        // Pass jobs out of order; the engine must still append low id first.
        engine
            .run_batch(&[high.clone(), low.clone()], &[r], now())
            .await;

        let recorded = matches.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].job_id, low.id);
        assert_eq!(recorded[1].job_id, high.id);
    }

    #[tokio::test]
    async fn test_batch_rerun_appends_instead_of_updating() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, resumes, jobs_store, matches) = engine(embedder);

        let r = resume("resume text", &[]);
        let j = fresh_job(Uuid::new_v4(), "alpha");
        resumes.rows.lock().unwrap().push(r.clone());
        jobs_store.rows.lock().unwrap().push(j.clone());

        engine.run_batch(&[j.clone()], &[r.clone()], now()).await;
        let r = resumes.get(r.id).await.unwrap().unwrap();
        let j = jobs_store.get(j.id).await.unwrap().unwrap();
        engine.run_batch(&[j], &[r], now()).await;

        assert_eq!(matches.recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_pair_failure_does_not_abort_siblings() {
        let embedder =
            Arc::new(StubEmbedder::new(&[]).failing_on("broken description"));
        let (engine, _, _, matches) = engine(embedder);

        let good = fresh_job(Uuid::from_u128(1), "alpha");
        let bad = fresh_job(Uuid::from_u128(2), "broken description");
        let r = resume("resume text", &[]);

        let outcome = engine.run_batch(&[good, bad.clone()], &[r], now()).await;

        assert_eq!(outcome.pairs_scored, 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].job_id, bad.id);
        assert_eq!(matches.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_resume_embedding_failure_fails_all_its_pairs() {
        let embedder = Arc::new(StubEmbedder::new(&[]).failing_on("broken resume"));
        let (engine, _, _, matches) = engine(embedder);

        let jobs = [
            fresh_job(Uuid::from_u128(1), "alpha"),
            fresh_job(Uuid::from_u128(2), "beta"),
        ];
        let good = resume("resume text", &[]);
        let broken = resume("broken resume", &[]);

        let outcome = engine.run_batch(&jobs, &[broken, good], now()).await;

        assert_eq!(outcome.pairs_scored, 2);
        assert_eq!(outcome.failed.len(), 2);
        assert_eq!(matches.recorded().len(), 2);
    }

    // ── Embedding cache ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_second_run_hits_persisted_embedding_cache() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, resumes, jobs_store, _) = engine(embedder.clone());

        let r = resume("resume text", &[]);
        let j = fresh_job(Uuid::new_v4(), "alpha");
        resumes.rows.lock().unwrap().push(r.clone());
        jobs_store.rows.lock().unwrap().push(j.clone());

        engine.run_batch(&[j.clone()], &[r.clone()], now()).await;
        assert_eq!(embedder.call_count(), 2); // one resume, one job

        // Reload the rows the way a fresh request would; the persisted
        // vectors must be reused without another model call.
        let r = resumes.get(r.id).await.unwrap().unwrap();
        let j = jobs_store.get(j.id).await.unwrap().unwrap();
        assert!(r.embedding.is_some());
        assert!(j.embedding.is_some());

        engine.run_batch(&[j], &[r], now()).await;
        assert_eq!(embedder.call_count(), 2);
    }

    #[tokio::test]
    async fn test_job_embedded_once_per_batch_across_resumes() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, _, _, _) = engine(embedder.clone());

        let j = fresh_job(Uuid::new_v4(), "alpha");
        let resumes = [resume("first resume", &[]), resume("second resume", &[])];

        engine.run_batch(&[j], &resumes, now()).await;

        // Two resume embeddings plus exactly one job embedding.
        assert_eq!(embedder.call_count(), 3);
    }

    // ── Ad-hoc matching ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ad_hoc_never_persists() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, _, _, matches) = engine(embedder);

        let results = engine
            .match_ad_hoc("resume text", &["python".to_string()], &[candidate("A", "python role")])
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_ad_hoc_uses_ad_hoc_weights() {
        // semantic 0.8, overlap 0.5 → 0.70·0.8 + 0.30·0.5 = 0.71 → 71
        let embedder = Arc::new(StubEmbedder::new(&[
            ("resume text", &[1.0, 0.0]),
            ("python only", &[0.8, 0.6]),
        ]));
        let (engine, _, _, _) = engine(embedder);

        let skills = vec!["python".to_string(), "sql".to_string()];
        let results = engine
            .match_ad_hoc("resume text", &skills, &[candidate("A", "python only")])
            .await
            .unwrap();

        assert_eq!(results[0].score, 71);
    }

    #[tokio::test]
    async fn test_ad_hoc_sorts_descending_with_stable_ties() {
        let embedder = Arc::new(StubEmbedder::new(&[
            ("resume text", &[1.0, 0.0]),
            ("weak fit", &[0.0, 1.0]),
            ("strong fit", &[1.0, 0.0]),
        ]));
        let (engine, _, _, _) = engine(embedder);

        // Two identical weak candidates bracket a strong one; the strong one
        // must rise to the top and the equal-scored pair must keep its
        // original relative order.
        let candidates = [
            candidate("first weak", "weak fit"),
            candidate("strong", "strong fit"),
            candidate("second weak", "weak fit"),
        ];

        let results = engine
            .match_ad_hoc("resume text", &[], &candidates)
            .await
            .unwrap();

        assert_eq!(results[0].title, "strong");
        assert_eq!(results[1].title, "first weak");
        assert_eq!(results[2].title, "second weak");
    }

    #[tokio::test]
    async fn test_ad_hoc_empty_candidate_list() {
        let embedder = Arc::new(StubEmbedder::new(&[]));
        let (engine, _, _, _) = engine(embedder.clone());

        let results = engine.match_ad_hoc("resume text", &[], &[]).await.unwrap();

        assert!(results.is_empty());
        // No candidates means no reason to embed anything at all.
        assert_eq!(embedder.call_count(), 0);
    }

    // ── Store contracts (pinned against the in-memory doubles) ─────────────

    #[tokio::test]
    async fn test_reingesting_same_external_id_returns_same_job() {
        let store = MemJobStore::default();
        let mut record = candidate("Backend Developer", "python");
        record.external_id = Some("ext-1".to_string());

        let first = store.ingest(&record).await.unwrap();
        record.title = "Renamed Listing".to_string();
        let second = store.ingest(&record).await.unwrap();

        assert_eq!(first.id, second.id);
        // Idempotent-by-identity: the stored fields are untouched.
        assert_eq!(second.title, "Backend Developer");
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_match_listing_orders_score_desc_then_job_id_asc() {
        let store = MemMatchStore::default();
        let resume_id = Uuid::new_v4();

        for (job_id, score) in [
            (Uuid::from_u128(5), 80),
            (Uuid::from_u128(3), 80),
            (Uuid::from_u128(9), 92),
        ] {
            store
                .record(NewMatch {
                    resume_id,
                    job_id,
                    score,
                    semantic_similarity: 0.5,
                    skill_overlap: 0.5,
                    missing_skills: &[],
                })
                .await
                .unwrap();
        }

        let listed = store.list_by_resume(resume_id).await.unwrap();
        let order: Vec<(Uuid, i32)> = listed.iter().map(|m| (m.job_id, m.score)).collect();
        assert_eq!(
            order,
            vec![
                (Uuid::from_u128(9), 92),
                (Uuid::from_u128(3), 80),
                (Uuid::from_u128(5), 80),
            ]
        );
    }
}
