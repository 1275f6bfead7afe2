//! Hybrid Match Engine — blends semantic similarity with keyword coverage and reports gaps.
//!
//! `final = semantic × 0.70 + keyword × 0.30` by default. Every sub-score is computed or
//! the whole analysis fails; a failed embedding never yields a partial report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::matching::coverage::{self, SkillGaps};
use crate::matching::extraction::{ExtractionReport, SkillExtractor};
use crate::matching::matcher::{title_case, SkillMatcher};
use crate::matching::semantic::{Embedder, EmbeddingError, SemanticScorer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub semantic: f64,
    pub keyword: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            semantic: 0.70,
            keyword: 0.30,
        }
    }
}

impl MatchWeights {
    pub fn blend(&self, semantic: f64, keyword: f64) -> f64 {
        self.semantic * semantic + self.keyword * keyword
    }
}

/// Screening outcome implied by the overall match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// ≥ 75
    Selected,
    /// 60 – 74.9
    UnderReview,
    Rejected,
}

impl SelectionStatus {
    pub fn from_match_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            SelectionStatus::Selected
        } else if percentage >= 60.0 {
            SelectionStatus::UnderReview
        } else {
            SelectionStatus::Rejected
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub analysis_id: Uuid,
    pub match_percentage: f64,
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_technical_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
    pub selection_status: SelectionStatus,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

pub struct MatchEngine {
    matcher: Arc<SkillMatcher>,
    extractor: SkillExtractor,
    semantic: SemanticScorer,
    weights: MatchWeights,
}

impl MatchEngine {
    pub fn new(
        matcher: Arc<SkillMatcher>,
        embedder: Arc<dyn Embedder>,
        weights: MatchWeights,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            extractor: SkillExtractor::new(matcher.clone())?,
            matcher,
            semantic: SemanticScorer::new(embedder),
            weights,
        })
    }

    pub fn model(&self) -> &str {
        self.semantic.model()
    }

    pub async fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<MatchReport, EmbeddingError> {
        let semantic = self.semantic.score(resume_text, jd_text).await?;

        let coverage = coverage::assess(&self.matcher, resume_text, jd_text);
        let keyword = coverage.score();
        let overall = self.weights.blend(semantic, keyword);
        let SkillGaps {
            missing_technical_skills,
            missing_soft_skills,
        } = coverage.gaps();

        debug!(
            required = coverage.required().len(),
            satisfied = coverage.satisfied_count(),
            semantic,
            keyword,
            overall,
            "Match analysis complete"
        );

        let match_percentage = round1(overall);
        Ok(MatchReport {
            analysis_id: Uuid::new_v4(),
            match_percentage,
            semantic_score: round1(semantic),
            keyword_score: round1(keyword),
            matched_skills: self.matched_skills(resume_text, jd_text),
            missing_technical_skills,
            missing_soft_skills,
            selection_status: SelectionStatus::from_match_percentage(match_percentage),
            model: self.model().to_string(),
            analyzed_at: Utc::now(),
        })
    }

    pub fn keyword_score(&self, resume_text: &str, jd_text: &str) -> f64 {
        coverage::keyword_score(&self.matcher, resume_text, jd_text)
    }

    pub fn identify_gaps(&self, resume_text: &str, jd_text: &str) -> SkillGaps {
        coverage::identify_gaps(&self.matcher, resume_text, jd_text)
    }

    pub fn extract(&self, resume_text: &str) -> ExtractionReport {
        self.extractor.extract(resume_text)
    }

    /// Résumé skills that also appear in the job text. Display only: the job side is a
    /// plain substring check, looser than the boundary-safe matching used for scoring.
    fn matched_skills(&self, resume_text: &str, jd_text: &str) -> Vec<String> {
        let jd_lower = jd_text.to_lowercase();
        let universe = self.matcher.taxonomy().universe().map(|(skill, _)| skill);
        self.matcher
            .skills_present(resume_text, universe)
            .into_iter()
            .filter(|skill| jd_lower.contains(skill))
            .map(title_case)
            .collect()
    }
}

/// One decimal place, ties to even (6.25 → 6.2, 6.35 → 6.4).
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
