/// Embedding client — the single point of entry for all embedding calls.
///
/// ARCHITECTURAL RULE: No other module may call the embedding API directly.
/// All text → vector conversions MUST go through the `Embedder` trait, which
/// is owned by the composing application and injected as `Arc<dyn Embedder>`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The embedding model requested from the serving endpoint.
/// This is intentionally hardcoded to prevent accidental drift — cached
/// vectors are only comparable when produced by the same model version.
pub const EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding API returned no vectors")]
    EmptyResponse,

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}

/// The embedding capability. `embed` is deterministic for a fixed model
/// version; callers treat it as pure. Implementations must be safe for
/// concurrent invocation.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// HTTP-backed embedder for an OpenAI-compatible `/embeddings` endpoint.
/// Wraps the model call with a request timeout and bounded retry; the model
/// itself runs out of process, so unavailability surfaces as an error here
/// and is never silently treated as zero similarity.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmbedder {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    /// Embeds one text. Retries on 429 (rate limit) and 5xx errors with
    /// exponential backoff.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: EMBEDDING_MODEL,
            input: text,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            let vector = parsed
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or(EmbeddingError::EmptyResponse)?;

            debug!("Embedded {} chars into {} dims", text.len(), vector.len());

            return Ok(vector);
        }

        Err(last_error.unwrap_or(EmbeddingError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Cosine similarity: dot product over the product of magnitudes.
/// Conceptually in [-1, 1]; natural-language embeddings land near [0, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::InvalidVector(format!(
            "dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return Err(EmbeddingError::InvalidVector(
            "zero-magnitude vector".to_string(),
        ));
    }

    Ok(dot / (mag_a * mag_b))
}
