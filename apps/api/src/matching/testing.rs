//! Deterministic `Embedder` stubs for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::matching::semantic::{Embedder, EmbeddingError};

pub const STUB_MODEL: &str = "stub-embedder";

/// Returns a fixed vector per known text, and `default` for everything else.
pub struct TableEmbedder {
    default: Vec<f32>,
    table: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            default,
            table: HashMap::new(),
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), vector);
        self
    }
}

#[async_trait]
impl Embedder for TableEmbedder {
    fn model(&self) -> &str {
        STUB_MODEL
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.table.get(text).unwrap_or(&self.default).clone())
    }
}

/// Behaves like an unavailable backend.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    fn model(&self) -> &str {
        STUB_MODEL
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Api {
            status: 503,
            message: "model not loaded".to_string(),
        })
    }
}
