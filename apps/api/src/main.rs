mod config;
mod embedding_client;
mod errors;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::embedding_client::HttpEmbedder;
use crate::matching::courses::CourseRecommender;
use crate::matching::engine::MatchEngine;
use crate::matching::matcher::SkillMatcher;
use crate::matching::taxonomy::SkillTaxonomy;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch v{}", env!("CARGO_PKG_VERSION"));

    // Taxonomy and skill patterns: built once, read-only afterwards
    let taxonomy = Arc::new(SkillTaxonomy::builtin());
    let matcher = Arc::new(SkillMatcher::new(taxonomy).context("Failed to compile skill patterns")?);

    // Embedding backend: reached once here so a dead model server fails startup
    let embedder = HttpEmbedder::new(
        &config.embedding_url,
        config.embedding_model.clone(),
        config.embedding_timeout,
    )?;
    let dimension = embedder
        .probe()
        .await
        .with_context(|| format!("Embedding backend at {} is not usable", config.embedding_url))?;
    info!(
        "Embedding model ready: {} (dim={dimension})",
        config.embedding_model
    );

    let engine = MatchEngine::new(matcher, Arc::new(embedder), config.weights)
        .context("Failed to build match engine")?;
    info!(
        "Match weights: semantic={} keyword={}",
        config.weights.semantic, config.weights.keyword
    );

    let recommender = CourseRecommender::new(&config.course_search_url)?;

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        recommender: Arc::new(recommender),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
