//! Slug rules for content records.
//!
//! Slugs are authored by hand in the content documents. A slug is accepted only
//! when it is already in canonical form, i.e. `slugify` leaves it unchanged, so
//! every record is addressable by exactly one URL path segment.

use std::collections::HashMap;

use slug::slugify;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug `{slug}` is not canonical; expected `{expected}`")]
    NotCanonical { slug: String, expected: String },
}

/// Check that `slug` is non-empty lowercase kebab-case.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.trim().is_empty() {
        return Err(SlugError::Empty);
    }

    let expected = slugify(slug);
    if expected != slug {
        return Err(SlugError::NotCanonical {
            slug: slug.to_string(),
            expected,
        });
    }

    Ok(())
}

/// Canonical slug for arbitrary text, or `None` when nothing survives slugification.
pub fn suggest_slug(title: &str) -> Option<String> {
    let candidate = slugify(title);
    (!candidate.is_empty()).then_some(candidate)
}

/// Deterministically generate unique anchor slugs within a single document.
///
/// Headings processed in order receive monotonic suffixes when duplicates
/// occur (`setup`, `setup-2`, `setup-3`). Headings that slugify to nothing
/// fall back to `section`.
#[derive(Default, Debug)]
pub struct AnchorSlugger {
    occurrences: HashMap<String, usize>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor_for(&mut self, heading: &str) -> String {
        let base = suggest_slug(heading).unwrap_or_else(|| "section".to_string());
        let count = self.occurrences.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kebab_case() {
        assert_eq!(validate_slug("esp32-freertos-thermostat"), Ok(()));
        assert_eq!(validate_slug("modern-api-design-patterns-2025"), Ok(()));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate_slug(""), Err(SlugError::Empty));
        assert_eq!(validate_slug("   "), Err(SlugError::Empty));
    }

    #[test]
    fn rejects_non_canonical() {
        let err = validate_slug("Edge ML").expect_err("uppercase and space");
        assert_eq!(
            err,
            SlugError::NotCanonical {
                slug: "Edge ML".to_string(),
                expected: "edge-ml".to_string(),
            }
        );
        assert!(validate_slug("trailing-").is_err());
    }

    #[test]
    fn suggests_slug_from_title() {
        assert_eq!(
            suggest_slug("MQTT for IoT Communication").as_deref(),
            Some("mqtt-for-iot-communication")
        );
        assert_eq!(suggest_slug("!!!"), None);
    }

    #[test]
    fn anchor_slugger_produces_unique_slugs() {
        let mut slugger = AnchorSlugger::new();

        assert_eq!(slugger.anchor_for("Overview"), "overview");
        assert_eq!(slugger.anchor_for("Overview"), "overview-2");
        assert_eq!(slugger.anchor_for("???"), "section");
    }
}
