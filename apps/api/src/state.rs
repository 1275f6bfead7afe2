use std::sync::Arc;

use crate::config::Config;
use crate::matching::courses::CourseRecommender;
use crate::matching::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Taxonomy, compiled patterns and the embedding backend, built once at startup.
    pub engine: Arc<MatchEngine>,
    pub recommender: Arc<CourseRecommender>,
    pub config: Config,
}
