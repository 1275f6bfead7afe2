//! Text Skill Matcher — boundary-safe literal detection plus implication-aware satisfaction.
//!
//! One compiled pattern per literal, built at startup. A literal matches when it is not
//! preceded or followed by a word character, so "java" never fires inside "javascript"
//! while skills ending in punctuation ("c++", "c#") still match before a space.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::matching::taxonomy::SkillTaxonomy;

/// Lower-cased text, normalized once and reused across many pattern checks.
#[derive(Debug, Clone)]
pub struct Haystack(String);

impl Haystack {
    pub fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct SkillMatcher {
    taxonomy: Arc<SkillTaxonomy>,
    patterns: HashMap<String, Regex>,
}

impl SkillMatcher {
    /// Compiles a pattern for every literal the taxonomy can ask about.
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Result<Self, regex::Error> {
        let patterns = taxonomy
            .literals()
            .into_iter()
            .map(|literal| skill_pattern(literal).map(|pattern| (literal.to_string(), pattern)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        debug!("Compiled {} skill patterns", patterns.len());
        Ok(Self { taxonomy, patterns })
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Every skill of `catalog` literally present in `text`.
    pub fn skills_present<'c, I>(&self, text: &str, catalog: I) -> BTreeSet<&'c str>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let haystack = Haystack::new(text);
        catalog
            .into_iter()
            .filter(|skill| self.is_present(skill, &haystack))
            .collect()
    }

    pub(crate) fn is_present(&self, skill: &str, haystack: &Haystack) -> bool {
        if haystack.as_str().is_empty() {
            return false;
        }
        match self.patterns.get(skill) {
            Some(pattern) => pattern.is_match(haystack.as_str()),
            // Literals outside the taxonomy are compiled on demand.
            None => skill_pattern(&skill.to_lowercase())
                .map(|pattern| pattern.is_match(haystack.as_str()))
                .unwrap_or(false),
        }
    }

    /// True if `skill` is present in the text, or implied by any of its evidence skills.
    pub fn skill_satisfied(&self, skill: &str, haystack: &Haystack) -> bool {
        if self.is_present(skill, haystack) {
            return true;
        }
        self.taxonomy
            .evidence_for(skill)
            .map(|evidence| {
                evidence
                    .iter()
                    .any(|candidate| self.is_present(candidate, haystack))
            })
            .unwrap_or(false)
    }
}

fn skill_pattern(skill: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"\b{{start-half}}{}\b{{end-half}}",
        regex::escape(skill)
    ))
}

/// Display form of a skill: first letter of every alphabetic run upper-cased, the rest
/// lower-cased ("node.js" → "Node.Js", "ci/cd" → "Ci/Cd").
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alphabetic = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
