use std::{sync::Arc, time::Duration};

use axum::{
    Form, Router,
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{
        blog::BlogService,
        catalog::Catalog,
        chrome::ChromeService,
        contact::{ContactForm, ContactFormState, ContactService},
        filter::CategoryFilter,
        methodology::{HOW_I_WORK_PATH, MethodologyService, StepSelection},
        projects::ProjectService,
        site::SiteService,
        tutorials::{TUTORIALS_PATH, TutorialService},
    },
    presentation::views::{
        AboutTemplate, BlogTemplate, ContactTemplate, ErrorPageView, HowIWorkTemplate,
        IndexTemplate, LayoutContext, PostTemplate, ProjectTemplate, ProjectsTemplate, TutorialTemplate,
        TutorialsTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

const CONTACT_SENT_STATUS: &str = "sent";

#[derive(Clone)]
pub struct HttpState {
    pub chrome: Arc<ChromeService>,
    pub site: Arc<SiteService>,
    pub projects: Arc<ProjectService>,
    pub blog: Arc<BlogService>,
    pub tutorials: Arc<TutorialService>,
    pub methodology: Arc<MethodologyService>,
    pub contact: Arc<ContactService>,
}

impl HttpState {
    /// Wire every page service to the shared catalog.
    pub fn new(catalog: Arc<Catalog>, contact_submit_delay: Duration) -> Self {
        Self {
            chrome: Arc::new(ChromeService::new(&catalog.site())),
            site: Arc::new(SiteService::new(catalog.clone())),
            projects: Arc::new(ProjectService::new(catalog.clone())),
            blog: Arc::new(BlogService::new(catalog.clone())),
            tutorials: Arc::new(TutorialService::new(catalog.clone())),
            methodology: Arc::new(MethodologyService::new(catalog)),
            contact: Arc::new(ContactService::new(contact_submit_delay)),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/projects", get(projects_index))
        .route("/projects/{slug}", get(project_detail))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(post_detail))
        .route("/tutorials", get(tutorials_index))
        .route("/tutorials/{slug}", get(tutorial_detail))
        .route(HOW_I_WORK_PATH, get(how_i_work))
        .route("/about", get(about))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/_health", get(health))
        .route("/static/{*path}", get(crate::infra::assets::serve_static))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.layout("Home", "/");
    let view = LayoutContext::new(chrome, state.site.home_view());
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn projects_index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.layout("Projects", "/projects");
    let view = LayoutContext::new(chrome, state.projects.list_view());
    render_template_response(ProjectsTemplate { view }, StatusCode::OK)
}

async fn project_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.projects.detail_view(&slug) {
        Some(content) => {
            let chrome = state
                .chrome
                .layout(&content.card.title, "/projects")
                .with_description(content.card.summary.clone());
            let view = LayoutContext::new(chrome, content);
            render_template_response(ProjectTemplate { view }, StatusCode::OK)
        }
        None => render_not_found_response(
            state.chrome.base(),
            ErrorPageView::missing("Project", "/projects", "Projects"),
        ),
    }
}

async fn blog_index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.layout("Blog", "/blog");
    let view = LayoutContext::new(chrome, state.blog.list_view());
    render_template_response(BlogTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.blog.detail_view(&slug) {
        Ok(Some(content)) => {
            let chrome = state
                .chrome
                .layout(&content.card.title, "/blog")
                .with_description(content.card.excerpt.clone());
            let view = LayoutContext::new(chrome, content);
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(
            state.chrome.base(),
            ErrorPageView::missing("Post", "/blog", "Blog"),
        ),
        Err(err) => err.into_response(),
    }
}

async fn tutorials_index(State(state): State<HttpState>, RawQuery(query): RawQuery) -> Response {
    let filter = CategoryFilter::from_query_string(query.as_deref());
    let chrome = state.chrome.layout("Tutorials", TUTORIALS_PATH);
    let view = LayoutContext::new(chrome, state.tutorials.list_view(filter));
    render_template_response(TutorialsTemplate { view }, StatusCode::OK)
}

async fn tutorial_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.tutorials.detail_view(&slug) {
        Ok(Some(content)) => {
            let chrome = state
                .chrome
                .layout(&content.card.title, TUTORIALS_PATH)
                .with_description(content.card.description.clone());
            let view = LayoutContext::new(chrome, content);
            render_template_response(TutorialTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(
            state.chrome.base(),
            ErrorPageView::missing("Tutorial", TUTORIALS_PATH, "Tutorials"),
        ),
        Err(err) => err.into_response(),
    }
}

async fn how_i_work(State(state): State<HttpState>, RawQuery(query): RawQuery) -> Response {
    let selection =
        StepSelection::from_query_string(query.as_deref(), state.methodology.step_count());
    let chrome = state.chrome.layout("How I Work", HOW_I_WORK_PATH);
    let view = LayoutContext::new(chrome, state.methodology.view(selection));
    render_template_response(HowIWorkTemplate { view }, StatusCode::OK)
}

async fn about(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.layout("About", "/about");
    let view = LayoutContext::new(chrome, state.site.about_view());
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactQuery {
    status: Option<String>,
}

async fn contact_page(
    State(state): State<HttpState>,
    Query(query): Query<ContactQuery>,
) -> Response {
    let mut content = state.site.contact_view(ContactForm::default(), Vec::new());
    if query.status.as_deref() == Some(CONTACT_SENT_STATUS) {
        content = content.sent();
    }

    let chrome = state.chrome.layout("Contact", "/contact");
    render_template_response(
        ContactTemplate {
            view: LayoutContext::new(chrome, content),
        },
        StatusCode::OK,
    )
}

async fn contact_submit(State(state): State<HttpState>, Form(form): Form<ContactForm>) -> Response {
    match state.contact.submit(&form).await {
        ContactFormState::Sent => {
            Redirect::to(&format!("/contact?status={CONTACT_SENT_STATUS}")).into_response()
        }
        outcome => {
            let content = state.site.contact_view(form, outcome.errors().to_vec());
            let chrome = state.chrome.layout("Contact", "/contact");
            render_template_response(
                ContactTemplate {
                    view: LayoutContext::new(chrome, content),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.base(), ErrorPageView::not_found())
}
