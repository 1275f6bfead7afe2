use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

use crate::matching::engine::MatchWeights;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding_url: Url,
    pub embedding_model: String,
    pub embedding_timeout: Duration,
    pub weights: MatchWeights,
    pub course_search_url: String,
    pub max_input_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let embedding_url = require_env("EMBEDDING_URL")?;
        let weights = MatchWeights {
            semantic: env_or("SEMANTIC_WEIGHT", 0.70)?,
            keyword: env_or("KEYWORD_WEIGHT", 0.30)?,
        };
        if weights.semantic < 0.0 || weights.keyword < 0.0 {
            bail!("SEMANTIC_WEIGHT and KEYWORD_WEIGHT must be non-negative");
        }

        Ok(Config {
            embedding_url: Url::parse(&embedding_url)
                .with_context(|| format!("EMBEDDING_URL '{embedding_url}' is not a valid URL"))?,
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string()),
            embedding_timeout: Duration::from_secs(env_or("EMBEDDING_TIMEOUT_SECS", 30)?),
            weights,
            course_search_url: std::env::var("COURSE_SEARCH_URL")
                .unwrap_or_else(|_| "https://www.coursera.org/search".to_string()),
            max_input_chars: env_or("MAX_INPUT_CHARS", 100_000)?,
            port: env_or("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default_when_unset() {
        let port: u16 = env_or("SKILLMATCH_TEST_UNSET_PORT", 5000).unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn test_env_or_parses_value() {
        std::env::set_var("SKILLMATCH_TEST_WEIGHT", " 0.55 ");
        let weight: f64 = env_or("SKILLMATCH_TEST_WEIGHT", 0.7).unwrap();
        assert!((weight - 0.55).abs() < f64::EPSILON);
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("SKILLMATCH_TEST_BAD_PORT", "eighty");
        let err = env_or::<u16>("SKILLMATCH_TEST_BAD_PORT", 5000).unwrap_err();
        assert!(err.to_string().contains("SKILLMATCH_TEST_BAD_PORT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("SKILLMATCH_TEST_MISSING").unwrap_err();
        assert!(err.to_string().contains("SKILLMATCH_TEST_MISSING"));
    }
}
