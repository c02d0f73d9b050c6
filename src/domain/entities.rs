//! Content records. All of them are loaded once at startup and never mutated.

use serde::Deserialize;
use time::Date;

use crate::domain::types::{Difficulty, LinkKind, PostCategory, TutorialCategory};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectLink {
    pub label: String,
    pub url: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub problem: String,
    pub solution: String,
    pub role: String,
    pub stack: Vec<String>,
    pub metrics: Vec<String>,
    pub links: Vec<ProjectLink>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub case_study: CaseStudy,
}

/// Fixed-shape write-up attached to every project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseStudy {
    pub overview: CaseStudyOverview,
    pub constraints: Vec<String>,
    pub architecture: Architecture,
    pub data: DataPractice,
    pub model_or_logic: ModelOrLogic,
    pub evaluation: Evaluation,
    pub deployment: Deployment,
    pub safety_privacy: SafetyPrivacy,
    pub results: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseStudyOverview {
    pub problem: String,
    pub users: String,
    pub success_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Architecture {
    pub description: String,
    pub components: Vec<ArchitectureComponent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchitectureComponent {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataPractice {
    pub source: String,
    pub labeling: String,
    pub quality_checks: Vec<String>,
    pub leakage_prevention: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelOrLogic {
    pub baseline: String,
    pub iterations: Vec<String>,
    pub why_chosen: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Evaluation {
    pub offline_metrics: Vec<String>,
    pub production_monitoring: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deployment {
    pub packaging: String,
    pub api: String,
    pub scaling: String,
    pub versioning: String,
    pub rollback: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SafetyPrivacy {
    pub pii_handling: String,
    pub security: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: Date,
    pub read_time: String,
    pub category: PostCategory,
    pub tags: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: TutorialCategory,
    pub difficulty: Difficulty,
    pub duration: String,
    pub topics: Vec<String>,
    pub prerequisites: Vec<String>,
    pub learning_outcomes: Vec<String>,
    pub content: String,
    pub order: i32,
}

impl Tutorial {
    /// Leading whole number of `duration` ("45 min" -> 45); anything else counts as zero.
    pub fn duration_minutes(&self) -> u32 {
        let digits: String = self
            .duration
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }
}

/// Site-wide metadata. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteProfile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub email: String,
    pub location: String,
    pub hero_tagline: String,
    pub specialties: Vec<Specialty>,
    pub trust_signals: Vec<String>,
    pub toolbox: Vec<ToolboxGroup>,
    pub social: SocialLinks,
    pub about: AboutCopy,
    pub how_i_work: Methodology,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Specialty {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolboxGroup {
    pub category: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub portfolio: String,
    pub thinksenselabs: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AboutCopy {
    pub summary: String,
    pub approach: String,
}

/// Copy for the working-method page: numbered process steps and competency groups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Methodology {
    pub headline: String,
    pub intro: String,
    #[serde(default)]
    pub principles: Vec<String>,
    #[serde(default)]
    pub pipeline: Vec<String>,
    #[serde(default)]
    pub process: Vec<ProcessStep>,
    #[serde(default)]
    pub competencies: Vec<Competency>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessStep {
    pub number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Competency {
    pub title: String,
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutorial_with_duration(duration: &str) -> Tutorial {
        Tutorial {
            id: "t-1".to_string(),
            slug: "t".to_string(),
            title: "T".to_string(),
            description: String::new(),
            category: TutorialCategory::Ai,
            difficulty: Difficulty::Beginner,
            duration: duration.to_string(),
            topics: Vec::new(),
            prerequisites: Vec::new(),
            learning_outcomes: Vec::new(),
            content: String::new(),
            order: 1,
        }
    }

    #[test]
    fn duration_minutes_reads_leading_number() {
        assert_eq!(tutorial_with_duration("45 min").duration_minutes(), 45);
        assert_eq!(tutorial_with_duration("180 min").duration_minutes(), 180);
    }

    #[test]
    fn duration_minutes_defaults_to_zero() {
        assert_eq!(tutorial_with_duration("about an hour").duration_minutes(), 0);
        assert_eq!(tutorial_with_duration("").duration_minutes(), 0);
    }
}
