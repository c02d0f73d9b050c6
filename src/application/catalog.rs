//! In-memory content catalog: load, validate, look up, filter.
//!
//! The catalog is built exactly once at startup from a [`ContentSource`]. Every
//! authoring defect (duplicate slugs, non-canonical slugs, unknown enum values,
//! malformed dates) is reported as a [`CatalogError`] so the process refuses to
//! start instead of serving ambiguous content. After construction the catalog is
//! immutable; lookups and filters are pure functions over it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use metrics::counter;
use serde::Deserialize;
use thiserror::Error;
use time::{Date, macros::format_description};
use tracing::debug;

use crate::application::repos::{ContentDocuments, ContentSource, ContentSourceError};
use crate::domain::entities::{BlogPost, Project, SiteProfile, Tutorial};
use crate::domain::slug::{SlugError, validate_slug};
use crate::domain::types::{ContentKind, PostCategory, TutorialCategory};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] ContentSourceError),
    #[error("failed to parse `{document}`: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {} slug: {source}", .kind.as_str())]
    InvalidSlug {
        kind: ContentKind,
        #[source]
        source: SlugError,
    },
    #[error("duplicate {} slug `{slug}`", .kind.as_str())]
    DuplicateSlug { kind: ContentKind, slug: String },
    #[error("duplicate {} id `{id}`", .kind.as_str())]
    DuplicateId { kind: ContentKind, id: String },
    #[error("post `{slug}` has invalid date `{value}`: {source}")]
    InvalidDate {
        slug: String,
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

/// A borrowed record of any kind, as returned by [`Catalog::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentRef<'a> {
    Project(&'a Project),
    Post(&'a BlogPost),
    Tutorial(&'a Tutorial),
}

impl<'a> ContentRef<'a> {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentRef::Project(_) => ContentKind::Project,
            ContentRef::Post(_) => ContentKind::Post,
            ContentRef::Tutorial(_) => ContentKind::Tutorial,
        }
    }

    pub fn slug(&self) -> &'a str {
        match self {
            ContentRef::Project(project) => &project.slug,
            ContentRef::Post(post) => &post.slug,
            ContentRef::Tutorial(tutorial) => &tutorial.slug,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            ContentRef::Project(project) => &project.title,
            ContentRef::Post(post) => &post.title,
            ContentRef::Tutorial(tutorial) => &tutorial.title,
        }
    }
}

/// Per-category totals shown on the tutorials filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: TutorialCategory,
    pub count: usize,
    pub total_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub projects: usize,
    pub posts: usize,
    pub tutorials: usize,
}

#[derive(Debug)]
pub struct Catalog {
    site: Arc<SiteProfile>,
    projects: Vec<Project>,
    posts: Vec<BlogPost>,
    tutorials: Vec<Tutorial>,
    project_index: HashMap<String, usize>,
    post_index: HashMap<String, usize>,
    tutorial_index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct ProjectsDocument {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct PostsDocument {
    #[serde(default)]
    posts: Vec<RawPost>,
}

#[derive(Deserialize)]
struct TutorialsDocument {
    #[serde(default)]
    tutorials: Vec<Tutorial>,
}

#[derive(Deserialize)]
struct RawPost {
    id: String,
    slug: String,
    title: String,
    excerpt: String,
    content: String,
    author: String,
    date: String,
    read_time: String,
    category: PostCategory,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    featured: bool,
}

impl RawPost {
    fn into_post(self) -> Result<BlogPost, CatalogError> {
        let format = format_description!("[year]-[month]-[day]");
        let date = Date::parse(self.date.trim(), format).map_err(|source| {
            CatalogError::InvalidDate {
                slug: self.slug.clone(),
                value: self.date.clone(),
                source,
            }
        })?;

        Ok(BlogPost {
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            date,
            read_time: self.read_time,
            category: self.category,
            tags: self.tags,
            featured: self.featured,
        })
    }
}

impl Catalog {
    /// Load and validate every document from `source`.
    pub fn load(source: &dyn ContentSource) -> Result<Self, CatalogError> {
        let documents = source.load()?;
        Self::from_documents(&documents)
    }

    pub fn from_documents(documents: &ContentDocuments) -> Result<Self, CatalogError> {
        let site: SiteProfile = parse_document("site.toml", &documents.site)?;
        let projects: ProjectsDocument = parse_document("projects.toml", &documents.projects)?;
        let posts: PostsDocument = parse_document("posts.toml", &documents.posts)?;
        let tutorials: TutorialsDocument =
            parse_document("tutorials.toml", &documents.tutorials)?;

        let posts = posts
            .posts
            .into_iter()
            .map(RawPost::into_post)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(site, projects.projects, posts, tutorials.tutorials)
    }

    /// Build a catalog from already-typed records, enforcing slug and id invariants.
    pub fn from_records(
        site: SiteProfile,
        projects: Vec<Project>,
        posts: Vec<BlogPost>,
        tutorials: Vec<Tutorial>,
    ) -> Result<Self, CatalogError> {
        let project_index = build_index(
            ContentKind::Project,
            projects.iter().map(|project| project.slug.as_str()),
        )?;
        let post_index = build_index(ContentKind::Post, posts.iter().map(|post| post.slug.as_str()))?;
        let tutorial_index = build_index(
            ContentKind::Tutorial,
            tutorials.iter().map(|tutorial| tutorial.slug.as_str()),
        )?;

        ensure_unique_ids(ContentKind::Post, posts.iter().map(|post| post.id.as_str()))?;
        ensure_unique_ids(
            ContentKind::Tutorial,
            tutorials.iter().map(|tutorial| tutorial.id.as_str()),
        )?;

        Ok(Self {
            site: Arc::new(site),
            projects,
            posts,
            tutorials,
            project_index,
            post_index,
            tutorial_index,
        })
    }

    pub fn site(&self) -> Arc<SiteProfile> {
        Arc::clone(&self.site)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            projects: self.projects.len(),
            posts: self.posts.len(),
            tutorials: self.tutorials.len(),
        }
    }

    /// Resolve `slug` within the collection selected by `kind`.
    pub fn lookup(&self, kind: ContentKind, slug: &str) -> Option<ContentRef<'_>> {
        match kind {
            ContentKind::Project => self.project(slug).map(ContentRef::Project),
            ContentKind::Post => self.post(slug).map(ContentRef::Post),
            ContentKind::Tutorial => self.tutorial(slug).map(ContentRef::Tutorial),
        }
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        find(&self.project_index, &self.projects, ContentKind::Project, slug)
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        find(&self.post_index, &self.posts, ContentKind::Post, slug)
    }

    pub fn tutorial(&self, slug: &str) -> Option<&Tutorial> {
        find(&self.tutorial_index, &self.tutorials, ContentKind::Tutorial, slug)
    }

    /// Tutorials for the optional category.
    ///
    /// Without a category every tutorial is returned in definition order. With
    /// one, only that category is returned, ordered by `order`; the sort is
    /// stable so equal `order` values keep definition order.
    pub fn tutorials_in(&self, category: Option<TutorialCategory>) -> Vec<&Tutorial> {
        match category {
            None => self.tutorials.iter().collect(),
            Some(category) => {
                let mut selected: Vec<&Tutorial> = self
                    .tutorials
                    .iter()
                    .filter(|tutorial| tutorial.category == category)
                    .collect();
                selected.sort_by_key(|tutorial| tutorial.order);
                selected
            }
        }
    }

    /// Same-category tutorials in `order` sequence, excluding `tutorial` itself.
    pub fn related_tutorials(&self, tutorial: &Tutorial, limit: usize) -> Vec<&Tutorial> {
        self.tutorials_in(Some(tutorial.category))
            .into_iter()
            .filter(|candidate| candidate.id != tutorial.id)
            .take(limit)
            .collect()
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        TutorialCategory::ALL
            .into_iter()
            .map(|category| {
                let tutorials = self.tutorials_in(Some(category));
                CategorySummary {
                    category,
                    count: tutorials.len(),
                    total_minutes: tutorials
                        .iter()
                        .map(|tutorial| tutorial.duration_minutes())
                        .sum(),
                }
            })
            .collect()
    }

    /// Featured projects in definition order. Callers truncate for display.
    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|project| project.featured).collect()
    }

    /// Featured posts in definition order. Callers truncate for display.
    pub fn featured_posts(&self) -> Vec<&BlogPost> {
        self.posts.iter().filter(|post| post.featured).collect()
    }

    pub fn recent_posts(&self, limit: usize) -> &[BlogPost] {
        &self.posts[..limit.min(self.posts.len())]
    }
}

fn parse_document<T>(document: &'static str, text: &str) -> Result<T, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    toml::from_str(text).map_err(|source| CatalogError::Parse { document, source })
}

fn build_index<'a>(
    kind: ContentKind,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::new();
    for (position, slug) in slugs.enumerate() {
        validate_slug(slug).map_err(|source| CatalogError::InvalidSlug { kind, source })?;
        if index.insert(slug.to_string(), position).is_some() {
            return Err(CatalogError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
            });
        }
    }
    Ok(index)
}

fn ensure_unique_ids<'a>(
    kind: ContentKind,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn find<'a, T>(
    index: &HashMap<String, usize>,
    records: &'a [T],
    kind: ContentKind,
    slug: &str,
) -> Option<&'a T> {
    let found = index.get(slug).and_then(|&position| records.get(position));
    if found.is_none() {
        record_miss(kind, slug);
    }
    found
}

fn record_miss(kind: ContentKind, slug: &str) {
    counter!("folio_content_lookup_miss_total", "kind" => kind.as_str()).increment(1);
    debug!(kind = kind.as_str(), slug, "content lookup miss");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::content::EmbeddedContent;

    fn catalog() -> Catalog {
        Catalog::load(&EmbeddedContent).expect("embedded content is valid")
    }

    fn documents() -> ContentDocuments {
        EmbeddedContent.load().expect("embedded documents")
    }

    #[test]
    fn every_record_resolves_by_its_own_slug() {
        let catalog = catalog();

        for project in catalog.projects() {
            let found = catalog.lookup(ContentKind::Project, &project.slug);
            assert_eq!(found, Some(ContentRef::Project(project)));
        }
        for post in catalog.posts() {
            let found = catalog.lookup(ContentKind::Post, &post.slug);
            assert_eq!(found, Some(ContentRef::Post(post)));
        }
        for tutorial in catalog.tutorials() {
            let found = catalog.lookup(ContentKind::Tutorial, &tutorial.slug);
            assert_eq!(found, Some(ContentRef::Tutorial(tutorial)));
        }
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let catalog = catalog();

        assert!(catalog.lookup(ContentKind::Project, "does-not-exist").is_none());
        assert!(catalog.lookup(ContentKind::Post, "nonexistent-slug").is_none());
        assert!(catalog.lookup(ContentKind::Tutorial, "").is_none());
    }

    #[test]
    fn thermostat_project_resolves() {
        let catalog = catalog();
        let found = catalog
            .lookup(ContentKind::Project, "esp32-freertos-thermostat")
            .expect("thermostat project");
        assert_eq!(found.kind(), ContentKind::Project);
        assert!(found.title().contains("Thermostat"));
    }

    #[test]
    fn lookups_do_not_cross_kinds() {
        let catalog = catalog();
        assert!(
            catalog
                .lookup(ContentKind::Post, "esp32-freertos-thermostat")
                .is_none()
        );
    }

    #[test]
    fn filter_by_category_returns_sorted_subset() {
        let catalog = catalog();
        let ai = catalog.tutorials_in(Some(TutorialCategory::Ai));

        assert_eq!(ai.len(), 6);
        let orders: Vec<i32> = ai.iter().map(|tutorial| tutorial.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
        let ids: Vec<&str> = ai.iter().map(|tutorial| tutorial.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-1", "ai-2", "ai-3", "ai-4", "ai-5", "ai-6"]);
    }

    #[test]
    fn every_tutorial_appears_once_in_its_category() {
        let catalog = catalog();
        for tutorial in catalog.tutorials() {
            let hits = catalog
                .tutorials_in(Some(tutorial.category))
                .into_iter()
                .filter(|candidate| candidate.slug == tutorial.slug)
                .count();
            assert_eq!(hits, 1, "{} should appear once", tutorial.slug);
        }
    }

    #[test]
    fn category_results_are_ordered() {
        let catalog = catalog();
        for category in TutorialCategory::ALL {
            let selected = catalog.tutorials_in(Some(category));
            assert!(
                selected
                    .windows(2)
                    .all(|pair| pair[0].order <= pair[1].order)
            );
            assert!(selected.iter().all(|tutorial| tutorial.category == category));
        }
    }

    #[test]
    fn no_category_returns_everything_in_definition_order() {
        let catalog = catalog();
        let all = catalog.tutorials_in(None);

        assert_eq!(all.len(), 18);
        assert_eq!(all.len(), catalog.tutorials().len());
        for (selected, defined) in all.iter().zip(catalog.tutorials()) {
            assert_eq!(selected.slug, defined.slug);
        }
    }

    #[test]
    fn filtering_returns_fresh_collections() {
        let catalog = catalog();
        let first = catalog.tutorials_in(Some(TutorialCategory::EmbeddedIot));
        let second = catalog.tutorials_in(Some(TutorialCategory::EmbeddedIot));
        assert_eq!(first, second);
        assert_eq!(catalog.tutorials()[0].id, "ai-1");
    }

    #[test]
    fn equal_order_keeps_definition_order() {
        let mut tutorials = catalog().tutorials().to_vec();
        // Second SE tutorial collides with the first on `order`.
        let se_two = tutorials
            .iter_mut()
            .find(|tutorial| tutorial.id == "se-2")
            .expect("se-2");
        se_two.order = 1;

        let catalog = Catalog::from_records(
            catalog().site().as_ref().clone(),
            Vec::new(),
            Vec::new(),
            tutorials,
        )
        .expect("valid records");
        let ids: Vec<&str> = catalog
            .tutorials_in(Some(TutorialCategory::SoftwareEngineering))
            .iter()
            .take(2)
            .map(|tutorial| tutorial.id.as_str())
            .collect();
        assert_eq!(ids, vec!["se-1", "se-2"]);
    }

    #[test]
    fn featured_selection_only_returns_featured_records() {
        let catalog = catalog();

        let projects = catalog.featured_projects();
        assert!(projects.iter().all(|project| project.featured));
        assert_eq!(
            projects.len(),
            catalog.projects().iter().filter(|p| p.featured).count()
        );

        let posts = catalog.featured_posts();
        assert!(!posts.is_empty());
        assert!(posts.iter().all(|post| post.featured));
        assert_eq!(
            posts.len(),
            catalog.posts().iter().filter(|p| p.featured).count()
        );
    }

    #[test]
    fn featured_selection_can_be_empty() {
        let base = catalog();
        let posts: Vec<BlogPost> = base
            .posts()
            .iter()
            .cloned()
            .map(|mut post| {
                post.featured = false;
                post
            })
            .collect();
        let catalog =
            Catalog::from_records(base.site().as_ref().clone(), Vec::new(), posts, Vec::new())
                .expect("valid records");
        assert!(catalog.featured_posts().is_empty());
        assert!(catalog.featured_projects().is_empty());
    }

    #[test]
    fn related_tutorials_exclude_self() {
        let catalog = catalog();
        let tutorial = catalog.tutorial("freertos-fundamentals").expect("tutorial");
        let related = catalog.related_tutorials(tutorial, 3);

        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|t| t.category == tutorial.category));
        assert!(related.iter().all(|t| t.slug != tutorial.slug));
        assert_eq!(related[0].slug, "introduction-to-embedded-systems");
    }

    #[test]
    fn category_summaries_total_durations() {
        let catalog = catalog();
        let summaries = catalog.category_summaries();

        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|summary| summary.count == 6));
        let ai = summaries
            .iter()
            .find(|summary| summary.category == TutorialCategory::Ai)
            .expect("ai summary");
        assert_eq!(ai.total_minutes, 45 + 60 + 90 + 120 + 150 + 180);
    }

    #[test]
    fn recent_posts_truncates() {
        let catalog = catalog();
        assert_eq!(catalog.recent_posts(2).len(), 2);
        assert_eq!(catalog.recent_posts(50).len(), catalog.posts().len());
    }

    #[test]
    fn duplicate_slug_fails_fast() {
        let mut documents = documents();
        documents.projects = documents.projects.replace(
            "slug = \"rf-drone-ml-vr-ecosystem\"",
            "slug = \"esp32-freertos-thermostat\"",
        );

        let err = Catalog::from_documents(&documents).expect_err("duplicate slug");
        assert!(matches!(
            err,
            CatalogError::DuplicateSlug { kind: ContentKind::Project, ref slug }
                if slug == "esp32-freertos-thermostat"
        ));
    }

    #[test]
    fn duplicate_tutorial_id_fails_fast() {
        let mut documents = documents();
        documents.tutorials = documents
            .tutorials
            .replace("id = \"ai-2\"", "id = \"ai-1\"");

        let err = Catalog::from_documents(&documents).expect_err("duplicate id");
        assert!(matches!(err, CatalogError::DuplicateId { kind: ContentKind::Tutorial, .. }));
    }

    #[test]
    fn unknown_tutorial_category_is_rejected() {
        let mut documents = documents();
        documents.tutorials = documents
            .tutorials
            .replacen("category = \"AI\"", "category = \"Robotics\"", 1);

        let err = Catalog::from_documents(&documents).expect_err("unknown category");
        assert!(matches!(
            err,
            CatalogError::Parse {
                document: "tutorials.toml",
                ..
            }
        ));
    }

    #[test]
    fn non_canonical_slug_is_rejected() {
        let mut documents = documents();
        documents.posts = documents.posts.replace(
            "slug = \"effective-code-review-practices\"",
            "slug = \"Effective Code Review\"",
        );

        let err = Catalog::from_documents(&documents).expect_err("bad slug");
        assert!(matches!(
            err,
            CatalogError::InvalidSlug {
                kind: ContentKind::Post,
                ..
            }
        ));
    }

    #[test]
    fn malformed_post_date_is_rejected() {
        let mut documents = documents();
        documents.posts = documents
            .posts
            .replace("date = \"2025-12-20\"", "date = \"December 20\"");

        let err = Catalog::from_documents(&documents).expect_err("bad date");
        assert!(matches!(err, CatalogError::InvalidDate { .. }));
    }
}
