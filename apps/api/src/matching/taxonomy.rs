//! Skill Taxonomy — the fixed technical/soft catalogs and the implication rules.
//!
//! Built once at startup and shared read-only (`Arc<SkillTaxonomy>`) by every request.

use std::collections::{BTreeSet, HashMap};

const TECHNICAL_SKILLS: &[&str] = &[
    "python", "java", "c++", "c#", "javascript", "typescript", "ruby", "php", "swift", "kotlin",
    "react", "angular", "vue", "node.js", "django", "flask", "spring boot", "dotnet",
    "html", "css", "sql", "nosql", "mysql", "postgresql", "mongodb", "oracle",
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "terraform", "git", "github",
    "gitlab", "jira", "confluence", "tableau", "powerbi", "excel", "figma",
    "machine learning", "deep learning", "nlp", "tensorflow", "pytorch", "scikit-learn",
    "oop", "object oriented", "functional programming", "rest api", "graphql", "ci/cd",
    "devops", "agile", "scrum", "kanban", "sdlc", "data structures", "algorithms",
    "linux", "unix", "bash", "shell",
    // Aggregates that are also implication keys, so a job can require them.
    "cloud", "frontend", "backend", "database",
];

const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "problem solving", "critical thinking",
    "time management", "adaptability", "collaboration", "creativity", "emotional intelligence",
    "negotiation", "conflict resolution", "decision making", "mentoring", "presentation",
    "active listening", "flexibility", "work ethic", "detail oriented", "stakeholder management",
];

/// Aggregate skill → concrete skills whose presence is evidence for it.
/// Order matters only for short-circuiting.
const IMPLICATION_RULES: &[(&str, &[&str])] = &[
    ("oop", &["java", "c++", "c#", "python", "ruby"]),
    ("object oriented", &["java", "c++", "c#", "python", "ruby"]),
    ("cloud", &["aws", "azure", "gcp"]),
    ("frontend", &["react", "angular", "vue", "html", "css", "javascript"]),
    ("backend", &["node.js", "django", "spring", "flask"]),
    ("database", &["sql", "mysql", "postgresql", "mongodb", "oracle"]),
    ("ci/cd", &["jenkins", "gitlab", "github actions"]),
    ("devops", &["docker", "kubernetes", "jenkins", "terraform"]),
];

/// Which catalog a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// The process-wide skill vocabulary plus implication rules.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    technical: BTreeSet<String>,
    soft: BTreeSet<String>,
    implications: HashMap<String, Vec<String>>,
}

impl SkillTaxonomy {
    /// The built-in catalogs and rules.
    pub fn builtin() -> Self {
        Self {
            technical: TECHNICAL_SKILLS.iter().map(|s| s.to_string()).collect(),
            soft: SOFT_SKILLS.iter().map(|s| s.to_string()).collect(),
            implications: IMPLICATION_RULES
                .iter()
                .map(|(skill, evidence)| {
                    (
                        skill.to_string(),
                        evidence.iter().map(|e| e.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn catalog(&self, category: SkillCategory) -> &BTreeSet<String> {
        match category {
            SkillCategory::Technical => &self.technical,
            SkillCategory::Soft => &self.soft,
        }
    }

    /// Every skill of both catalogs, tagged with its category.
    pub fn universe(&self) -> impl Iterator<Item = (&str, SkillCategory)> {
        self.technical
            .iter()
            .map(|s| (s.as_str(), SkillCategory::Technical))
            .chain(self.soft.iter().map(|s| (s.as_str(), SkillCategory::Soft)))
    }

    /// Evidence skills for an implication key, in rule order.
    pub fn evidence_for(&self, skill: &str) -> Option<&[String]> {
        self.implications.get(skill).map(Vec::as_slice)
    }

    /// Every literal the matcher has to detect directly: catalog skills, rule keys and
    /// rule evidence (some evidence, e.g. "github actions", lives outside the catalogs).
    pub fn literals(&self) -> BTreeSet<&str> {
        let mut literals: BTreeSet<&str> = self.universe().map(|(s, _)| s).collect();
        for (skill, evidence) in &self.implications {
            literals.insert(skill.as_str());
            literals.extend(evidence.iter().map(String::as_str));
        }
        literals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_disjoint() {
        let taxonomy = SkillTaxonomy::builtin();
        let tech = taxonomy.catalog(SkillCategory::Technical);
        let soft = taxonomy.catalog(SkillCategory::Soft);
        assert!(tech.is_disjoint(soft));
        assert_eq!(taxonomy.universe().count(), tech.len() + soft.len());
    }

    #[test]
    fn test_skills_are_lowercase() {
        let taxonomy = SkillTaxonomy::builtin();
        for (skill, _) in taxonomy.universe() {
            assert_eq!(skill, skill.to_lowercase());
        }
    }

    #[test]
    fn test_evidence_keeps_rule_order() {
        let taxonomy = SkillTaxonomy::builtin();
        let evidence = taxonomy.evidence_for("cloud").unwrap();
        assert_eq!(evidence, ["aws", "azure", "gcp"]);
        assert!(taxonomy.evidence_for("python").is_none());
    }

    #[test]
    fn test_literals_include_evidence_outside_catalogs() {
        let taxonomy = SkillTaxonomy::builtin();
        let literals = taxonomy.literals();
        assert!(literals.contains("github actions"));
        assert!(literals.contains("spring"));
        assert!(literals.contains("cloud"));
        assert!(literals.contains("stakeholder management"));
    }
}
