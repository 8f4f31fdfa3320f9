//! Job feed — fetches postings from Adzuna and normalizes them for ingestion.
//!
//! Admission rules, applied before anything reaches the job store:
//! - only postings within the freshness window (5 days); unknown dates pass
//! - the title must contain one of the requested role keywords,
//!   case-insensitively
//! - when a company allow-list is given, the company name must contain one of
//!   the allow-listed names as a substring
//!
//! If Adzuna credentials are missing the feed serves a small mocked dataset
//! so local testing works end to end.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::matching::recency::FRESHNESS_WINDOW_DAYS;

const ADZUNA_URL: &str = "https://api.adzuna.com/v1/api/jobs/us/search/1";
const RESULTS_PER_PAGE: u32 = 50;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A normalized job record as handed to the job store.
#[derive(Debug, Clone)]
pub struct IngestedJob {
    pub external_id: Option<String>,
    pub title: String,
    pub company: Option<String>,
    pub description: String,
    pub posted_date: Option<DateTime<Utc>>,
    pub apply_url: Option<String>,
}

/// The listings capability. Returns already-filtered, normalized records.
#[async_trait]
pub trait JobFeed: Send + Sync {
    async fn fetch(
        &self,
        roles: &[String],
        companies: &[String],
    ) -> Result<Vec<IngestedJob>, FeedError>;
}

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: Option<serde_json::Value>,
    title: Option<String>,
    company: Option<AdzunaCompany>,
    description: Option<String>,
    created: Option<String>,
    redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCompany {
    display_name: Option<String>,
}

pub struct AdzunaFeed {
    client: Client,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl AdzunaFeed {
    pub fn new(app_id: Option<String>, app_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            app_id,
            app_key,
        }
    }
}

#[async_trait]
impl JobFeed for AdzunaFeed {
    async fn fetch(
        &self,
        roles: &[String],
        companies: &[String],
    ) -> Result<Vec<IngestedJob>, FeedError> {
        let now = Utc::now();

        let (Some(app_id), Some(app_key)) = (&self.app_id, &self.app_key) else {
            warn!("Adzuna credentials not set - using mocked jobs for local testing");
            return Ok(mocked_jobs(now)
                .into_iter()
                .filter(|j| admit(j, roles, companies, now))
                .collect());
        };

        let what = roles.join(" OR ");
        let mut params = vec![
            ("app_id", app_id.clone()),
            ("app_key", app_key.clone()),
            ("results_per_page", RESULTS_PER_PAGE.to_string()),
            ("what", what),
        ];
        if !companies.is_empty() {
            params.push(("company", companies.join(",")));
        }

        let response = self.client.get(ADZUNA_URL).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: AdzunaResponse = response.json().await?;
        debug!("Adzuna returned {} raw results", parsed.results.len());

        Ok(parsed
            .results
            .into_iter()
            .filter_map(normalize)
            .filter(|j| admit(j, roles, companies, now))
            .collect())
    }
}

/// Maps a raw Adzuna result to the normalized record, dropping results with
/// no title. The external id falls back to the redirect URL, matching what
/// the upstream source keys duplicates on.
fn normalize(job: AdzunaJob) -> Option<IngestedJob> {
    let title = job.title?;

    let external_id = match job.id {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => job.redirect_url.clone(),
    };

    Some(IngestedJob {
        external_id,
        title,
        company: job.company.and_then(|c| c.display_name),
        description: job.description.unwrap_or_default(),
        posted_date: job.created.as_deref().and_then(parse_posted_date),
        apply_url: job.redirect_url,
    })
}

/// Parses the posting timestamp: RFC 3339 first, then the bare
/// `YYYY-MM-DDTHH:MM:SS` shape some sources emit.
pub fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// The admission filter. Pure so the rules are testable against a fixed
/// clock.
pub fn admit(
    job: &IngestedJob,
    roles: &[String],
    companies: &[String],
    now: DateTime<Utc>,
) -> bool {
    if let Some(posted) = job.posted_date {
        if now - posted > Duration::days(FRESHNESS_WINDOW_DAYS) {
            return false;
        }
    }

    let title = job.title.to_lowercase();
    if !roles.iter().any(|r| title.contains(&r.to_lowercase())) {
        return false;
    }

    if !companies.is_empty() {
        let company = job
            .company
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if !companies.iter().any(|c| company.contains(&c.to_lowercase())) {
            return false;
        }
    }

    true
}

/// Sample postings served when no Adzuna credentials are configured.
fn mocked_jobs(now: DateTime<Utc>) -> Vec<IngestedJob> {
    vec![
        IngestedJob {
            external_id: Some("mock-1".to_string()),
            title: "Backend Developer".to_string(),
            company: Some("Amazon".to_string()),
            description: "Work on backend systems with python and docker.".to_string(),
            posted_date: Some(now - Duration::days(1)),
            apply_url: Some("https://example.com/apply/1".to_string()),
        },
        IngestedJob {
            external_id: Some("mock-2".to_string()),
            title: "Frontend Engineer".to_string(),
            company: Some("Google".to_string()),
            description: "Frontend work with react and typescript.".to_string(),
            posted_date: Some(now - Duration::days(3)),
            apply_url: Some("https://example.com/apply/2".to_string()),
        },
    ]
}
