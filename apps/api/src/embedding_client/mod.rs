/// Embedding Client — the sentence-embedding backend used for semantic similarity.
///
/// Talks to a text-embeddings server exposing `POST /embed` (Hugging Face TEI wire format):
/// request `{"inputs": [...], "normalize": true, "truncate": true}`, response `[[f32, ...], ...]`.
/// The model itself is loaded by that server; this client is built once at startup and
/// shared by all requests. `reqwest::Client` is safe for concurrent use, so no lock.
///
/// Failures are returned as-is: no retries, no fallback score.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::semantic::{Embedder, EmbeddingError};

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    normalize: bool,
    truncate: bool,
}

#[derive(Debug, Deserialize)]
struct EmbedErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: Url,
    model: String,
}

impl HttpEmbedder {
    pub fn new(base_url: &Url, model: String, timeout: Duration) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut endpoint = base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| EmbeddingError::InvalidEndpoint(base_url.to_string()))?
            .pop_if_empty()
            .push("embed");

        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    /// Embeds a probe sentence so startup fails fast when the model server is down.
    /// Returns the vector dimension.
    pub async fn probe(&self) -> Result<usize, EmbeddingError> {
        let vector = self.embed("skill match warm-up").await?;
        if vector.is_empty() {
            return Err(EmbeddingError::EmptyVector);
        }
        Ok(vector.len())
    }

    async fn post(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = EmbedRequest {
            inputs: texts,
            normalize: true,
            truncate: true,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<EmbedErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let vectors: Vec<Vec<f32>> = response.json().await?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::BatchSize {
                expected: texts.len(),
                got: vectors.len(),
            });
        }

        debug!(
            "Embedded {} texts (dim={})",
            vectors.len(),
            vectors.first().map(Vec::len).unwrap_or(0)
        );
        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.post(&[text])
            .await?
            .pop()
            .ok_or(EmbeddingError::BatchSize {
                expected: 1,
                got: 0,
            })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.post(texts).await
    }
}
