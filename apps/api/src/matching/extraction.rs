//! Skill extraction from a résumé, plus a years-of-experience heuristic.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::matcher::{title_case, SkillMatcher};
use crate::matching::taxonomy::SkillCategory;

pub const EXPERIENCE_NOT_SPECIFIED: &str = "Not specified";

/// "5 years", "10+ yrs", "3yr". Does not tell "5 years ago" from "5 years of experience".
const EXPERIENCE_PATTERN: &str = r"(?i)([0-9]+)\+?\s*(?:years?|yrs?)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_detected: String,
}

pub struct SkillExtractor {
    matcher: Arc<SkillMatcher>,
    experience: Regex,
}

impl SkillExtractor {
    pub fn new(matcher: Arc<SkillMatcher>) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher,
            experience: Regex::new(EXPERIENCE_PATTERN)?,
        })
    }

    pub fn extract(&self, resume_text: &str) -> ExtractionReport {
        ExtractionReport {
            technical_skills: self.found(resume_text, SkillCategory::Technical),
            soft_skills: self.found(resume_text, SkillCategory::Soft),
            experience_detected: match self.max_years(resume_text) {
                Some(years) => format!("{years} years detected"),
                None => EXPERIENCE_NOT_SPECIFIED.to_string(),
            },
        }
    }

    fn found(&self, resume_text: &str, category: SkillCategory) -> Vec<String> {
        let catalog = self.matcher.taxonomy().catalog(category);
        self.matcher
            .skills_present(resume_text, catalog.iter().map(String::as_str))
            .into_iter()
            .map(title_case)
            .collect()
    }

    /// Largest year count mentioned anywhere in the text, as its decimal digits.
    /// Compared by magnitude without parsing, so no count is too large.
    fn max_years<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.experience
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|digits| strip_leading_zeros(digits.as_str()))
            .max_by_key(|digits| (digits.len(), *digits))
    }
}

fn strip_leading_zeros(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}
