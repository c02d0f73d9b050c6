use std::sync::Arc;

use crate::application::cards::project_card;
use crate::application::catalog::Catalog;
use crate::presentation::views::{ProjectDetailView, ProjectsView};

#[derive(Clone)]
pub struct ProjectService {
    catalog: Arc<Catalog>,
}

impl ProjectService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn list_view(&self) -> ProjectsView {
        ProjectsView {
            projects: self.catalog.projects().iter().map(project_card).collect(),
        }
    }

    /// Detail view for `slug`, or `None` when no project matches.
    pub fn detail_view(&self, slug: &str) -> Option<ProjectDetailView> {
        let project = self.catalog.project(slug)?;

        Some(ProjectDetailView {
            card: project_card(project),
            problem: project.problem.clone(),
            solution: project.solution.clone(),
            role: project.role.clone(),
            case_study: project.case_study.clone(),
        })
    }
}
