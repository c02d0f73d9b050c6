//! Closed enumerations shared by content records and filters.

use serde::Deserialize;

/// The three tutorial tracks. Filtering assumes this set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TutorialCategory {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    #[serde(rename = "Embedded Systems & IoT")]
    EmbeddedIot,
}

impl TutorialCategory {
    /// Every category in display order.
    pub const ALL: [TutorialCategory; 3] = [
        TutorialCategory::Ai,
        TutorialCategory::SoftwareEngineering,
        TutorialCategory::EmbeddedIot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TutorialCategory::Ai => "AI",
            TutorialCategory::SoftwareEngineering => "Software Engineering",
            TutorialCategory::EmbeddedIot => "Embedded Systems & IoT",
        }
    }

    /// Exact, case-sensitive match against the category label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
    }

    /// Stable token used for CSS hooks in templates.
    pub fn css_token(self) -> &'static str {
        match self {
            TutorialCategory::Ai => "ai",
            TutorialCategory::SoftwareEngineering => "software",
            TutorialCategory::EmbeddedIot => "embedded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// Blog categories. Only a few are used by the current posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PostCategory {
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    #[serde(rename = "Career")]
    Career,
    #[serde(rename = "Tutorials")]
    Tutorials,
    #[serde(rename = "Industry")]
    Industry,
}

impl PostCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PostCategory::AiMl => "AI/ML",
            PostCategory::SoftwareEngineering => "Software Engineering",
            PostCategory::Career => "Career",
            PostCategory::Tutorials => "Tutorials",
            PostCategory::Industry => "Industry",
        }
    }

    pub fn css_token(self) -> &'static str {
        match self {
            PostCategory::AiMl => "ai-ml",
            PostCategory::SoftwareEngineering => "software",
            PostCategory::Career => "career",
            PostCategory::Tutorials => "tutorials",
            PostCategory::Industry => "industry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Repo,
    Demo,
    Readme,
    Writeup,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Repo => "repo",
            LinkKind::Demo => "demo",
            LinkKind::Readme => "readme",
            LinkKind::Writeup => "writeup",
        }
    }
}

/// Which collection a slug is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Project,
    Post,
    Tutorial,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Project => "project",
            ContentKind::Post => "post",
            ContentKind::Tutorial => "tutorial",
        }
    }

    /// Listing page a visitor is sent back to when a slug does not resolve.
    pub fn listing_path(self) -> &'static str {
        match self {
            ContentKind::Project => "/projects",
            ContentKind::Post => "/blog",
            ContentKind::Tutorial => "/tutorials",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutorial_category_labels_round_trip() {
        for category in TutorialCategory::ALL {
            assert_eq!(TutorialCategory::from_label(category.as_str()), Some(category));
        }
    }

    #[test]
    fn tutorial_category_match_is_exact() {
        assert_eq!(TutorialCategory::from_label("ai"), None);
        assert_eq!(TutorialCategory::from_label(" AI"), None);
        assert_eq!(TutorialCategory::from_label("Nonexistent"), None);
    }
}
