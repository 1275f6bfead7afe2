//! Axum route handlers for the matching API.
//!
//! Absent or null text fields are treated as empty strings; only oversized input is rejected.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::courses::CourseRecommendation;
use crate::matching::coverage::SkillGaps;
use crate::matching::engine::MatchReport;
use crate::matching::extraction::ExtractionReport;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub current_skills: Option<Vec<String>>,
    #[serde(default)]
    pub target_skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<CourseRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct KeywordScoreResponse {
    pub keyword_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ml/analyze
///
/// Hybrid semantic + keyword match of a résumé against a job description.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let (resume, jd) = match_texts(&state, request)?;
    let report = state.engine.analyze(&resume, &jd).await?;
    Ok(Json(report))
}

/// POST /api/ml/keyword-score
pub async fn handle_keyword_score(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<KeywordScoreResponse>, AppError> {
    let (resume, jd) = match_texts(&state, request)?;
    Ok(Json(KeywordScoreResponse {
        keyword_score: state.engine.keyword_score(&resume, &jd),
    }))
}

/// POST /api/ml/skill-gaps
pub async fn handle_skill_gaps(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<SkillGaps>, AppError> {
    let (resume, jd) = match_texts(&state, request)?;
    Ok(Json(state.engine.identify_gaps(&resume, &jd)))
}

/// POST /api/ml/extract-skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionReport>, AppError> {
    let resume = request.resume_text.unwrap_or_default();
    check_length(&state, "resumeText", &resume)?;
    Ok(Json(state.engine.extract(&resume)))
}

/// POST /api/ml/extract-skills/upload
///
/// Multipart upload with a PDF résumé in the `resume` field.
pub async fn handle_extract_skills_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionReport>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some(RESUME_FIELD) {
            pdf = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            );
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
    })?;

    let size = pdf.len();
    let resume = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
    .map_err(|e| AppError::Validation(format!("resume is not a readable PDF: {e}")))?;

    info!("Extracted {} chars from {size}-byte PDF resume", resume.len());
    check_length(&state, RESUME_FIELD, &resume)?;
    Ok(Json(state.engine.extract(&resume)))
}

/// POST /api/ml/recommend-courses
pub async fn handle_recommend_courses(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let target = request.target_skills.unwrap_or_default();
    let current = request.current_skills.unwrap_or_default();
    Ok(Json(RecommendResponse {
        recommendations: state.recommender.recommend(&target, &current),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn match_texts(state: &AppState, request: MatchRequest) -> Result<(String, String), AppError> {
    let resume = request.resume_text.unwrap_or_default();
    let jd = request.job_description.unwrap_or_default();
    check_length(state, "resumeText", &resume)?;
    check_length(state, "jobDescription", &jd)?;
    Ok((resume, jd))
}

fn check_length(state: &AppState, field: &str, text: &str) -> Result<(), AppError> {
    let limit = state.config.max_input_chars;
    if text.chars().count() > limit {
        return Err(AppError::Validation(format!(
            "{field} exceeds {limit} characters"
        )));
    }
    Ok(())
}
