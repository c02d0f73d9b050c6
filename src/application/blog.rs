use std::sync::Arc;

use crate::application::cards::post_card;
use crate::application::catalog::Catalog;
use crate::application::error::HttpError;
use crate::application::render::Document;
use crate::presentation::views::{BlogView, PostDetailView, render_blocks};

const FEATURED_LIMIT: usize = 2;
const RECENT_LIMIT: usize = 5;

#[derive(Clone)]
pub struct BlogService {
    catalog: Arc<Catalog>,
}

impl BlogService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn list_view(&self) -> BlogView {
        BlogView {
            featured: self
                .catalog
                .featured_posts()
                .into_iter()
                .take(FEATURED_LIMIT)
                .map(post_card)
                .collect(),
            recent: self
                .catalog
                .recent_posts(RECENT_LIMIT)
                .iter()
                .map(post_card)
                .collect(),
            total: self.catalog.posts().len(),
        }
    }

    /// Detail view for `slug`; `Ok(None)` when no post matches.
    pub fn detail_view(&self, slug: &str) -> Result<Option<PostDetailView>, HttpError> {
        let Some(post) = self.catalog.post(slug) else {
            return Ok(None);
        };

        let document = Document::parse(&post.content);
        let body_html = render_blocks(&document.blocks)?;

        Ok(Some(PostDetailView {
            card: post_card(post),
            author: post.author.clone(),
            body_html,
            outline: document.outline(),
            contains_code: document.contains_code(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::content::EmbeddedContent;

    fn service() -> BlogService {
        let catalog = Catalog::load(&EmbeddedContent).expect("catalog");
        BlogService::new(Arc::new(catalog))
    }

    #[test]
    fn list_splits_featured_and_recent() {
        let view = service().list_view();

        assert_eq!(view.featured.len(), FEATURED_LIMIT);
        assert_eq!(view.recent.len(), RECENT_LIMIT);
        assert_eq!(view.total, 5);
    }

    #[test]
    fn detail_renders_body() {
        let view = service()
            .detail_view("building-production-ready-llm-applications")
            .expect("render")
            .expect("post");

        assert_eq!(view.card.published, "Dec 20, 2025");
        assert!(
            view.body_html
                .contains("<h3 id=\"the-reality-of-llm-in-production\">")
        );
        assert!(!view.outline.is_empty());
    }

    #[test]
    fn unknown_slug_has_no_view() {
        let view = service().detail_view("nonexistent-slug").expect("render");
        assert!(view.is_none());
    }
}
