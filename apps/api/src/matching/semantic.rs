//! Semantic similarity — the embedding capability the engine depends on, and the
//! cosine-similarity score built on it.
//!
//! Backends implement `Embedder`; the engine holds an `Arc<dyn Embedder>` created once at
//! startup. The HTTP backend lives in `embedding_client`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding backend returned {got} vectors for {expected} inputs")]
    BatchSize { expected: usize, got: usize },

    #[error("Embedding backend returned an empty vector")]
    EmptyVector,

    #[error("Invalid embedding endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// A sentence-embedding model: text in, fixed-length vector out.
///
/// Implementations must be safe for concurrent use; the engine never serializes calls.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model label, reported alongside every match.
    fn model(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds several texts. Backends with a real batch path should override this.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Cosine similarity in [-1, 1]. A zero vector is similar to nothing (0.0).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Scores two texts as `cosine × 100`. Negative cosine gives a negative score.
#[derive(Clone)]
pub struct SemanticScorer {
    embedder: Arc<dyn Embedder>,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn model(&self) -> &str {
        self.embedder.model()
    }

    pub async fn score(&self, text_a: &str, text_b: &str) -> Result<f64, EmbeddingError> {
        let vectors = self.embedder.embed_batch(&[text_a, text_b]).await?;
        match vectors.as_slice() {
            [a, b] => {
                if a.is_empty() || b.is_empty() {
                    return Err(EmbeddingError::EmptyVector);
                }
                Ok(cosine_similarity(a, b)? * 100.0)
            }
            _ => Err(EmbeddingError::BatchSize {
                expected: 2,
                got: vectors.len(),
            }),
        }
    }
}
