//! Course Recommender — one generic course suggestion per target skill.

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::matching::matcher::title_case;

pub const PLATFORM_LABEL: &str = "Coursera / Udemy / EdX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub skill: String,
    pub course_name: String,
    pub platform: String,
    pub query_link: String,
}

pub struct CourseRecommender {
    search_base: Url,
}

impl CourseRecommender {
    pub fn new(search_url: &str) -> Result<Self> {
        let search_base = Url::parse(search_url)
            .with_context(|| format!("Invalid course search URL '{search_url}'"))?;
        Ok(Self { search_base })
    }

    /// One recommendation per target skill, in input order, duplicates kept.
    /// `current_skills` is accepted for future filtering and currently ignored.
    pub fn recommend(
        &self,
        target_skills: &[String],
        _current_skills: &[String],
    ) -> Vec<CourseRecommendation> {
        target_skills
            .iter()
            .map(|skill| self.recommendation_for(skill))
            .collect()
    }

    fn recommendation_for(&self, skill: &str) -> CourseRecommendation {
        let skill = title_case(skill.trim());

        let mut link = self.search_base.clone();
        link.query_pairs_mut().append_pair("query", &skill);

        CourseRecommendation {
            course_name: format!("Mastering {skill}: From Zero to Hero"),
            platform: PLATFORM_LABEL.to_string(),
            query_link: link.to_string(),
            skill,
        }
    }
}
