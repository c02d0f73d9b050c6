//! Tutorial category filter, kept in sync with the `category` query parameter.
//!
//! The filter has two states, no filter and a single active category. The
//! state is derived from the URL when a page is requested, and every
//! transition produces the URL that represents the new state so a filtered
//! view is always bookmarkable.

use url::form_urlencoded;

use crate::domain::types::TutorialCategory;

/// Name of the only recognised query parameter.
pub const CATEGORY_PARAM: &str = "category";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(TutorialCategory),
}

/// User-driven transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    Select(TutorialCategory),
    Clear,
}

impl CategoryFilter {
    /// Initial state from the raw query parameter value. Unknown values mean no filter.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(TutorialCategory::from_label)
            .map_or(CategoryFilter::All, CategoryFilter::Category)
    }

    /// Initial state from a full query string such as `category=AI&page=2`.
    pub fn from_query_string(query: Option<&str>) -> Self {
        let value = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == CATEGORY_PARAM)
                .map(|(_, value)| value.into_owned())
        });
        Self::from_query(value.as_deref())
    }

    pub fn apply(self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::Select(category) => CategoryFilter::Category(category),
            FilterEvent::Clear => CategoryFilter::All,
        }
    }

    pub fn category(self) -> Option<TutorialCategory> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(category) => Some(category),
        }
    }

    pub fn is_active(self, category: TutorialCategory) -> bool {
        self.category() == Some(category)
    }

    /// Encoded query string for this state, or `None` when no parameter should be present.
    pub fn query_string(self) -> Option<String> {
        self.category().map(|category| {
            form_urlencoded::Serializer::new(String::new())
                .append_pair(CATEGORY_PARAM, category.as_str())
                .finish()
        })
    }

    /// URL for this state relative to `base` (for example `/tutorials`).
    pub fn href(self, base: &str) -> String {
        match self.query_string() {
            Some(query) => format!("{base}?{query}"),
            None => base.to_string(),
        }
    }

    /// URL reached by applying `event` to this state.
    pub fn href_after(self, event: FilterEvent, base: &str) -> String {
        self.apply(event).href(base)
    }

    /// The category control toggles: choosing the active category clears it.
    pub fn toggle_event(self, category: TutorialCategory) -> FilterEvent {
        if self.is_active(category) {
            FilterEvent::Clear
        } else {
            FilterEvent::Select(category)
        }
    }
}
