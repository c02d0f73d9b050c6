//! Home, about, and contact page views built from the site profile and catalog.

use std::sync::Arc;

use crate::application::cards::{post_card, project_teaser};
use crate::application::catalog::Catalog;
use crate::application::contact::{ContactForm, FieldError};
use crate::presentation::views::{AboutView, ContactView, HeroView, HomeView};

const HOME_FEATURED_PROJECTS: usize = 3;
const HOME_FEATURED_POSTS: usize = 2;
const TEASER_METRICS: usize = 3;
const TEASER_STACK: usize = 5;

#[derive(Clone)]
pub struct SiteService {
    catalog: Arc<Catalog>,
}

impl SiteService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn home_view(&self) -> HomeView {
        let site = self.catalog.site();

        let featured_projects = self
            .catalog
            .featured_projects()
            .into_iter()
            .take(HOME_FEATURED_PROJECTS)
            .map(|project| project_teaser(project, TEASER_METRICS, TEASER_STACK))
            .collect();

        let featured_posts = self
            .catalog
            .featured_posts()
            .into_iter()
            .take(HOME_FEATURED_POSTS)
            .map(post_card)
            .collect();

        HomeView {
            hero: HeroView {
                name: site.name.clone(),
                role: site.role.clone(),
                tagline: site.tagline.clone(),
                summary: site.hero_tagline.clone(),
                resume_url: site.social.resume_url.clone(),
                github_url: site.social.github.clone(),
            },
            featured_projects,
            featured_posts,
            specialties: site.specialties.clone(),
            toolbox: site.toolbox.clone(),
        }
    }

    pub fn about_view(&self) -> AboutView {
        let site = self.catalog.site();

        AboutView {
            name: site.name.clone(),
            role: site.role.clone(),
            location: site.location.clone(),
            summary: site.about.summary.clone(),
            approach: site.about.approach.clone(),
            specialties: site.specialties.clone(),
            trust_signals: site.trust_signals.clone(),
            toolbox: site.toolbox.clone(),
            resume_url: site.social.resume_url.clone(),
        }
    }

    /// Contact page with the submitted values and validation messages, if any.
    pub fn contact_view(&self, form: ContactForm, errors: Vec<FieldError>) -> ContactView {
        let site = self.catalog.site();
        ContactView::new(site.email.clone(), site.location.clone(), form, errors)
    }
}
