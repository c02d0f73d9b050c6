//! The working-method page and its process-step selector.
//!
//! Exactly one process step is expanded at a time. The expanded step comes from
//! the `step` query parameter (1-based) so every selection has its own URL;
//! a missing, malformed or out-of-range value selects the first step.

use std::sync::Arc;

use url::form_urlencoded;

use crate::application::catalog::Catalog;
use crate::domain::entities::ProcessStep;
use crate::presentation::views::{ActiveStepView, MethodologyView, ProcessStepView};

pub const HOW_I_WORK_PATH: &str = "/how-i-work";

/// Name of the query parameter carrying the selected step.
pub const STEP_PARAM: &str = "step";

/// Zero-based index of the expanded step, always within `0..len` for a non-empty process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSelection(usize);

impl StepSelection {
    /// Selection for the raw `step` value against a process of `len` steps.
    pub fn from_query(value: Option<&str>, len: usize) -> Self {
        value
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|number| (1..=len).contains(number))
            .map_or(StepSelection(0), |number| StepSelection(number - 1))
    }

    /// Selection from a full query string such as `step=3`.
    pub fn from_query_string(query: Option<&str>, len: usize) -> Self {
        let value = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == STEP_PARAM)
                .map(|(_, value)| value.into_owned())
        });
        Self::from_query(value.as_deref(), len)
    }

    pub fn select(index: usize) -> Self {
        StepSelection(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// URL for this selection; the first step needs no parameter.
    pub fn href(self, base: &str) -> String {
        match self.0 {
            0 => base.to_string(),
            index => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(STEP_PARAM, &(index + 1).to_string())
                    .finish();
                format!("{base}?{query}")
            }
        }
    }
}

#[derive(Clone)]
pub struct MethodologyService {
    catalog: Arc<Catalog>,
}

impl MethodologyService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn step_count(&self) -> usize {
        self.catalog.site().how_i_work.process.len()
    }

    pub fn view(&self, selection: StepSelection) -> MethodologyView {
        let site = self.catalog.site();
        let methodology = &site.how_i_work;

        let steps = methodology
            .process
            .iter()
            .enumerate()
            .map(|(index, step)| ProcessStepView {
                number: step.number.clone(),
                title: step.title.clone(),
                description: step.description.clone(),
                href: StepSelection::select(index).href(HOW_I_WORK_PATH),
                is_active: index == selection.index(),
            })
            .collect();

        MethodologyView {
            headline: methodology.headline.clone(),
            intro: methodology.intro.clone(),
            principles: methodology.principles.clone(),
            steps,
            active: methodology
                .process
                .get(selection.index())
                .map(active_step),
            pipeline: methodology.pipeline.clone(),
            competencies: methodology.competencies.clone(),
        }
    }
}

fn active_step(step: &ProcessStep) -> ActiveStepView {
    ActiveStepView {
        number: step.number.clone(),
        title: step.title.clone(),
        description: step.description.clone(),
        details: step.details.clone(),
    }
}
