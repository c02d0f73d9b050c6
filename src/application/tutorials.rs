//! Tutorial listing with the category filter bar, and tutorial detail pages.

use std::sync::Arc;

use crate::application::cards::tutorial_card;
use crate::application::catalog::Catalog;
use crate::application::error::HttpError;
use crate::application::filter::CategoryFilter;
use crate::application::render::Document;
use crate::presentation::views::{
    CategoryFilterCard, TutorialDetailView, TutorialsView, render_blocks,
};

pub const TUTORIALS_PATH: &str = "/tutorials";

const RELATED_LIMIT: usize = 3;

#[derive(Clone)]
pub struct TutorialService {
    catalog: Arc<Catalog>,
}

impl TutorialService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn list_view(&self, filter: CategoryFilter) -> TutorialsView {
        let categories = self
            .catalog
            .category_summaries()
            .into_iter()
            .map(|summary| CategoryFilterCard {
                label: summary.category.as_str(),
                token: summary.category.css_token(),
                count: summary.count,
                total_minutes: summary.total_minutes,
                href: filter.href_after(filter.toggle_event(summary.category), TUTORIALS_PATH),
                is_active: filter.is_active(summary.category),
            })
            .collect();

        TutorialsView {
            categories,
            active_category: filter.category().map(|category| category.as_str()),
            clear_href: CategoryFilter::All.href(TUTORIALS_PATH),
            tutorials: self
                .catalog
                .tutorials_in(filter.category())
                .into_iter()
                .map(tutorial_card)
                .collect(),
        }
    }

    /// Detail view for `slug`; `Ok(None)` when no tutorial matches.
    pub fn detail_view(&self, slug: &str) -> Result<Option<TutorialDetailView>, HttpError> {
        let Some(tutorial) = self.catalog.tutorial(slug) else {
            return Ok(None);
        };

        let document = Document::parse(&tutorial.content);
        let body_html = render_blocks(&document.blocks)?;

        Ok(Some(TutorialDetailView {
            card: tutorial_card(tutorial),
            prerequisites: tutorial.prerequisites.clone(),
            learning_outcomes: tutorial.learning_outcomes.clone(),
            body_html,
            outline: document.outline(),
            contains_code: document.contains_code(),
            related: self
                .catalog
                .related_tutorials(tutorial, RELATED_LIMIT)
                .into_iter()
                .map(tutorial_card)
                .collect(),
            category_href: CategoryFilter::Category(tutorial.category).href(TUTORIALS_PATH),
        }))
    }
}
