//! Keyword coverage and skill gaps.
//!
//! Both are views over one `Coverage` value: the job's required skills, each marked
//! satisfied or not by the résumé. The score and the gap lists therefore can never
//! disagree about which skills count.

use serde::{Deserialize, Serialize};

use crate::matching::matcher::{title_case, Haystack, SkillMatcher};
use crate::matching::taxonomy::SkillCategory;

/// A skill the job description asks for, and whether the résumé covers it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredSkill<'t> {
    pub skill: &'t str,
    pub category: SkillCategory,
    pub satisfied: bool,
}

/// Required skills of a job description, checked against one résumé.
/// Ordered alphabetically within each category.
#[derive(Debug, Clone)]
pub struct Coverage<'t> {
    required: Vec<RequiredSkill<'t>>,
}

/// Required skills the résumé does not satisfy, in display form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGaps {
    pub missing_technical_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
}

/// Finds the job's required skills across the whole Skill Universe and checks each
/// against the résumé, directly or through implication rules.
pub fn assess<'t>(matcher: &'t SkillMatcher, resume_text: &str, jd_text: &str) -> Coverage<'t> {
    let jd = Haystack::new(jd_text);
    let resume = Haystack::new(resume_text);

    let required = matcher
        .taxonomy()
        .universe()
        .filter(|(skill, _)| matcher.is_present(skill, &jd))
        .map(|(skill, category)| RequiredSkill {
            skill,
            category,
            satisfied: matcher.skill_satisfied(skill, &resume),
        })
        .collect();

    Coverage { required }
}

impl<'t> Coverage<'t> {
    pub fn required(&self) -> &[RequiredSkill<'t>] {
        &self.required
    }

    pub fn satisfied_count(&self) -> usize {
        self.required.iter().filter(|r| r.satisfied).count()
    }

    /// Percentage of required skills satisfied, in [0, 100]. Zero requirements score 0.0.
    pub fn score(&self) -> f64 {
        if self.required.is_empty() {
            return 0.0;
        }
        100.0 * self.satisfied_count() as f64 / self.required.len() as f64
    }

    pub fn gaps(&self) -> SkillGaps {
        SkillGaps {
            missing_technical_skills: self.missing(SkillCategory::Technical),
            missing_soft_skills: self.missing(SkillCategory::Soft),
        }
    }

    fn missing(&self, category: SkillCategory) -> Vec<String> {
        self.required
            .iter()
            .filter(|r| r.category == category && !r.satisfied)
            .map(|r| title_case(r.skill))
            .collect()
    }
}

/// Fraction of job-required skills the résumé satisfies, as a percentage.
pub fn keyword_score(matcher: &SkillMatcher, resume_text: &str, jd_text: &str) -> f64 {
    assess(matcher, resume_text, jd_text).score()
}

/// Required technical and soft skills the résumé does not satisfy.
pub fn identify_gaps(matcher: &SkillMatcher, resume_text: &str, jd_text: &str) -> SkillGaps {
    assess(matcher, resume_text, jd_text).gaps()
}
