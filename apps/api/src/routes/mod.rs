pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/ml/analyze", post(handlers::handle_analyze))
        .route("/api/ml/keyword-score", post(handlers::handle_keyword_score))
        .route("/api/ml/skill-gaps", post(handlers::handle_skill_gaps))
        .route("/api/ml/extract-skills", post(handlers::handle_extract_skills))
        .route(
            "/api/ml/extract-skills/upload",
            post(handlers::handle_extract_skills_upload),
        )
        .route(
            "/api/ml/recommend-courses",
            post(handlers::handle_recommend_courses),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use reqwest::Url;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::matching::courses::CourseRecommender;
    use crate::matching::engine::{MatchEngine, MatchWeights};
    use crate::matching::matcher::SkillMatcher;
    use crate::matching::semantic::Embedder;
    use crate::matching::taxonomy::SkillTaxonomy;
    use crate::matching::testing::{FailingEmbedder, TableEmbedder, STUB_MODEL};

    fn test_config() -> Config {
        Config {
            embedding_url: Url::parse("http://localhost:8081").unwrap(),
            embedding_model: STUB_MODEL.to_string(),
            embedding_timeout: Duration::from_secs(5),
            weights: MatchWeights::default(),
            course_search_url: "https://www.coursera.org/search".to_string(),
            max_input_chars: 200,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    fn app_with(embedder: impl Embedder + 'static) -> Router {
        let config = test_config();
        let matcher = Arc::new(SkillMatcher::new(Arc::new(SkillTaxonomy::builtin())).unwrap());
        let engine = MatchEngine::new(matcher, Arc::new(embedder), config.weights).unwrap();
        let recommender = CourseRecommender::new(&config.course_search_url).unwrap();
        build_router(AppState {
            engine: Arc::new(engine),
            recommender: Arc::new(recommender),
            config,
        })
    }

    fn app() -> Router {
        app_with(TableEmbedder::new(vec![1.0, 0.0]))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "UP");
        assert_eq!(body["model"], STUB_MODEL);
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let (status, body) = post_json(
            app(),
            "/api/ml/analyze",
            json!({"resumeText": "I use Java daily", "jobDescription": "Requires strong OOP skills"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["semantic_score"], 100.0);
        assert_eq!(body["keyword_score"], 100.0);
        assert_eq!(body["match_percentage"], 100.0);
        assert_eq!(body["selection_status"], "SELECTED");
        assert_eq!(body["missing_technical_skills"], json!([]));
        assert!(body["analysis_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_missing_and_null_fields_are_empty() {
        let (status, body) = post_json(
            app(),
            "/api/ml/analyze",
            json!({"resumeText": null}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyword_score"], 0.0);
        assert_eq!(body["missing_soft_skills"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_embedding_failure_is_502() {
        let (status, body) = post_json(
            app_with(FailingEmbedder),
            "/api/ml/analyze",
            json!({"resumeText": "Python", "jobDescription": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "EMBEDDING_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_input_is_400() {
        let (status, body) = post_json(
            app(),
            "/api/ml/skill-gaps",
            json!({"resumeText": "x".repeat(201), "jobDescription": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_keyword_score_and_gaps_endpoints() {
        let request = json!({
            "resumeText": "I write Python scripts",
            "jobDescription": "Must know OOP and cloud computing"
        });
        let (_, score) = post_json(app(), "/api/ml/keyword-score", request.clone()).await;
        assert_eq!(score["keyword_score"], 50.0);

        let (_, gaps) = post_json(app(), "/api/ml/skill-gaps", request).await;
        assert_eq!(gaps["missing_technical_skills"], json!(["Cloud"]));
        assert_eq!(gaps["missing_soft_skills"], json!([]));
    }

    #[tokio::test]
    async fn test_extract_skills() {
        let (status, body) = post_json(
            app(),
            "/api/ml/extract-skills",
            json!({"resumeText": "5+ years of Docker, 3 years of leadership"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["technical_skills"], json!(["Docker"]));
        assert_eq!(body["soft_skills"], json!(["Leadership"]));
        assert_eq!(body["experience_detected"], "5 years detected");
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_400() {
        let boundary = "skillmatch-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/ml/extract-skills/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommend_courses_preserves_order() {
        let (status, body) = post_json(
            app(),
            "/api/ml/recommend-courses",
            json!({"currentSkills": [], "targetSkills": ["AWS", "Docker"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["skill"], "Aws");
        assert_eq!(recs[1]["skill"], "Docker");
        assert_eq!(recs[1]["course_name"], "Mastering Docker: From Zero to Hero");
    }
}
