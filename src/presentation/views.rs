use crate::application::contact::{ContactForm, ContactTopic, FieldError};
use crate::application::error::{ErrorReport, HttpError};
use crate::application::render::{Block, OutlineEntry, Span};
use crate::domain::entities::{CaseStudy, Competency, Specialty, ToolboxGroup};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Render parsed body blocks to an HTML fragment.
pub fn render_blocks(blocks: &[Block]) -> Result<String, HttpError> {
    DocumentPartial { blocks }.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_blocks",
            "Content rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_not_found_response(chrome: LayoutChrome, content: ErrorPageView) -> Response {
    let chrome = chrome.for_page(&content.title, None);
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
    pub email: String,
    pub links: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub is_external: bool,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    /// Chrome for a single page: `"<page> | <site name>"` title and the matching nav entry marked.
    pub fn for_page(self, page_title: &str, active_path: Option<&str>) -> Self {
        let navigation = NavigationView {
            entries: self
                .navigation
                .entries
                .into_iter()
                .map(|entry| NavigationLinkView {
                    is_active: active_path == Some(entry.href.as_str()),
                    ..entry
                })
                .collect(),
        };

        Self {
            meta: PageMetaView {
                title: format!("{page_title} | {}", self.brand.title),
                ..self.meta
            },
            navigation,
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            meta: PageMetaView {
                description: description.into(),
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct LinkView {
    pub label: String,
    pub url: String,
    pub kind: &'static str,
}

#[derive(Clone)]
pub struct ProjectCard {
    pub href: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub stack: Vec<String>,
    pub metrics: Vec<String>,
    pub links: Vec<LinkView>,
    pub thumbnail: Option<String>,
}

#[derive(Clone)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub category: &'static str,
    pub category_token: &'static str,
    pub iso_date: String,
    pub published: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

#[derive(Clone)]
pub struct TutorialCard {
    pub href: String,
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub category_token: &'static str,
    pub difficulty: &'static str,
    pub duration: String,
    pub topics: Vec<String>,
}

pub struct HeroView {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub summary: String,
    pub resume_url: String,
    pub github_url: String,
}

pub struct HomeView {
    pub hero: HeroView,
    pub featured_projects: Vec<ProjectCard>,
    pub featured_posts: Vec<PostCard>,
    pub specialties: Vec<Specialty>,
    pub toolbox: Vec<ToolboxGroup>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct ProjectsView {
    pub projects: Vec<ProjectCard>,
}

#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectsTemplate {
    pub view: LayoutContext<ProjectsView>,
}

pub struct ProjectDetailView {
    pub card: ProjectCard,
    pub problem: String,
    pub solution: String,
    pub role: String,
    pub case_study: CaseStudy,
}

#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectTemplate {
    pub view: LayoutContext<ProjectDetailView>,
}

pub struct BlogView {
    pub featured: Vec<PostCard>,
    pub recent: Vec<PostCard>,
    pub total: usize,
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub view: LayoutContext<BlogView>,
}

pub struct PostDetailView {
    pub card: PostCard,
    pub author: String,
    pub body_html: String,
    pub outline: Vec<OutlineEntry>,
    pub contains_code: bool,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct CategoryFilterCard {
    pub label: &'static str,
    pub token: &'static str,
    pub count: usize,
    pub total_minutes: u32,
    pub href: String,
    pub is_active: bool,
}

pub struct TutorialsView {
    pub categories: Vec<CategoryFilterCard>,
    pub active_category: Option<&'static str>,
    pub clear_href: String,
    pub tutorials: Vec<TutorialCard>,
}

#[derive(Template)]
#[template(path = "tutorials.html")]
pub struct TutorialsTemplate {
    pub view: LayoutContext<TutorialsView>,
}

pub struct TutorialDetailView {
    pub card: TutorialCard,
    pub prerequisites: Vec<String>,
    pub learning_outcomes: Vec<String>,
    pub body_html: String,
    pub outline: Vec<OutlineEntry>,
    pub contains_code: bool,
    pub related: Vec<TutorialCard>,
    pub category_href: String,
}

#[derive(Template)]
#[template(path = "tutorial.html")]
pub struct TutorialTemplate {
    pub view: LayoutContext<TutorialDetailView>,
}

pub struct AboutView {
    pub name: String,
    pub role: String,
    pub location: String,
    pub summary: String,
    pub approach: String,
    pub specialties: Vec<Specialty>,
    pub trust_signals: Vec<String>,
    pub toolbox: Vec<ToolboxGroup>,
    pub resume_url: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct ProcessStepView {
    pub number: String,
    pub title: String,
    pub description: String,
    pub href: String,
    pub is_active: bool,
}

pub struct ActiveStepView {
    pub number: String,
    pub title: String,
    pub description: String,
    pub details: Vec<String>,
}

pub struct MethodologyView {
    pub headline: String,
    pub intro: String,
    pub principles: Vec<String>,
    pub steps: Vec<ProcessStepView>,
    pub active: Option<ActiveStepView>,
    pub pipeline: Vec<String>,
    pub competencies: Vec<Competency>,
}

#[derive(Template)]
#[template(path = "how_i_work.html")]
pub struct HowIWorkTemplate {
    pub view: LayoutContext<MethodologyView>,
}

pub struct TopicOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct ContactView {
    pub email: String,
    pub location: String,
    pub form: ContactForm,
    pub topics: Vec<TopicOption>,
    pub errors: Vec<FieldError>,
    pub sent: bool,
}

impl ContactView {
    pub fn new(email: String, location: String, form: ContactForm, errors: Vec<FieldError>) -> Self {
        let topics = ContactTopic::ALL
            .into_iter()
            .map(|topic| TopicOption {
                value: topic.as_str(),
                label: topic.label(),
                selected: form.subject == topic.as_str(),
            })
            .collect();

        Self {
            email,
            location,
            form,
            topics,
            errors,
            sent: false,
        }
    }

    pub fn sent(self) -> Self {
        Self { sent: true, ..self }
    }

    /// First validation message for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field.as_str() == field)
            .map(|error| error.message)
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactView>,
}

#[derive(Template)]
#[template(path = "partials/document.html")]
struct DocumentPartial<'a> {
    blocks: &'a [Block],
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to continue exploring.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    /// Fallback for a slug that matched nothing, pointing back at the listing it came from.
    pub fn missing(noun: &str, listing_href: &str, listing_label: &str) -> Self {
        Self {
            title: format!("{noun} Not Found"),
            message: format!(
                "The {} you are looking for does not exist or may have moved.",
                noun.to_lowercase()
            ),
            primary_action: Some(ErrorAction {
                href: listing_href.to_string(),
                label: format!("Back to {listing_label}"),
            }),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
