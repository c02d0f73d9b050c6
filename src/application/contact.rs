//! Contact form: field validation, the form state machine, and the simulated submission.
//!
//! Submissions never leave the process. After validation the service waits a
//! fixed delay and reports success unconditionally.

use std::fmt;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::info;

const SOURCE: &str = "application::contact::ContactService";

/// What the visitor wants to talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactTopic {
    Project,
    Consulting,
    Job,
    Question,
    Other,
}

impl ContactTopic {
    pub const ALL: [ContactTopic; 5] = [
        ContactTopic::Project,
        ContactTopic::Consulting,
        ContactTopic::Job,
        ContactTopic::Question,
        ContactTopic::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactTopic::Project => "project",
            ContactTopic::Consulting => "consulting",
            ContactTopic::Job => "job",
            ContactTopic::Question => "question",
            ContactTopic::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactTopic::Project => "Project Inquiry",
            ContactTopic::Consulting => "Consulting",
            ContactTopic::Job => "Job Opportunity",
            ContactTopic::Question => "General Question",
            ContactTopic::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == value.trim())
    }
}

/// Raw form fields exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub topic: ContactTopic,
    pub message: String,
}

impl ContactForm {
    /// Validate every field, reporting all problems at once.
    pub fn validate(&self) -> Result<ContactSubmission, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: ContactField::Name,
                message: "Please enter your name.",
            });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "Please enter your email address.",
            });
        } else if !is_plausible_email(email) {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "Please enter a valid email address.",
            });
        }

        let topic = ContactTopic::from_value(&self.subject);
        if topic.is_none() {
            errors.push(FieldError {
                field: ContactField::Subject,
                message: "Please choose a subject.",
            });
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError {
                field: ContactField::Message,
                message: "Please enter a message.",
            });
        }

        match topic {
            Some(topic) if errors.is_empty() => Ok(ContactSubmission {
                name: name.to_string(),
                email: email.to_string(),
                topic,
                message: message.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Lifecycle of the form on the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContactFormState {
    #[default]
    Idle,
    Invalid(Vec<FieldError>),
    Submitting,
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// The visitor pressed send; carries whether validation passed.
    Submit { valid: bool },
    /// The simulated delivery completed.
    Delivered,
    /// The visitor chose to write another message.
    Reset,
}

impl ContactFormState {
    /// Next state for `event`, given the validation outcome for submit events.
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn next(self, event: ContactEvent, errors: Vec<FieldError>) -> Self {
        match (self, event) {
            (
                ContactFormState::Idle | ContactFormState::Invalid(_),
                ContactEvent::Submit { valid: true },
            ) => ContactFormState::Submitting,
            (
                ContactFormState::Idle | ContactFormState::Invalid(_),
                ContactEvent::Submit { valid: false },
            ) => ContactFormState::Invalid(errors),
            (ContactFormState::Submitting, ContactEvent::Delivered) => ContactFormState::Sent,
            (ContactFormState::Sent, ContactEvent::Reset) => ContactFormState::Idle,
            (state, _) => state,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            ContactFormState::Invalid(errors) => errors,
            _ => &[],
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, ContactFormState::Sent)
    }
}

#[derive(Clone)]
pub struct ContactService {
    submit_delay: Duration,
}

impl ContactService {
    pub fn new(submit_delay: Duration) -> Self {
        Self { submit_delay }
    }

    /// Validate and deliver `form`, returning the final form state.
    ///
    /// Valid forms always end in [`ContactFormState::Sent`]; invalid ones end in
    /// [`ContactFormState::Invalid`] without waiting.
    pub async fn submit(&self, form: &ContactForm) -> ContactFormState {
        let started = Instant::now();
        let (state, submission) = match form.validate() {
            Ok(submission) => (
                ContactFormState::Idle.next(ContactEvent::Submit { valid: true }, Vec::new()),
                submission,
            ),
            Err(errors) => {
                counter!("folio_contact_rejected_total").increment(1);
                info!(
                    target = SOURCE,
                    errors = errors.len(),
                    "contact form rejected"
                );
                return ContactFormState::Idle.next(ContactEvent::Submit { valid: false }, errors);
            }
        };

        tokio::time::sleep(self.submit_delay).await;

        counter!("folio_contact_submissions_total").increment(1);
        histogram!("folio_contact_submit_ms").record(started.elapsed().as_secs_f64() * 1000.0);
        info!(
            target = SOURCE,
            topic = submission.topic.as_str(),
            message_len = submission.message.len(),
            "contact form delivered"
        );

        state.next(ContactEvent::Delivered, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "consulting".to_string(),
            message: "Let's build an analytical engine.".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_submission() {
        let submission = valid_form().validate().expect("valid form");
        assert_eq!(submission.topic, ContactTopic::Consulting);
        assert_eq!(submission.name, "Ada Lovelace");
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactForm::default().validate().expect_err("empty form");
        let fields: Vec<ContactField> = errors.iter().map(|error| error.field).collect();
        assert_eq!(
            fields,
            vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::Subject,
                ContactField::Message,
            ]
        );
    }

    #[test]
    fn email_needs_both_sides_of_the_at_sign() {
        for email in ["ada", "@example.com", "ada@", "a b@example.com", "a@b@c"] {
            let form = ContactForm {
                email: email.to_string(),
                ..valid_form()
            };
            let errors = form.validate().expect_err(email);
            assert_eq!(errors.len(), 1, "{email}");
            assert_eq!(errors[0].field, ContactField::Email);
        }
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let form = ContactForm {
            subject: "spam".to_string(),
            ..valid_form()
        };
        let errors = form.validate().expect_err("unknown subject");
        assert_eq!(errors[0].field, ContactField::Subject);
    }

    #[test]
    fn state_machine_transitions() {
        let submitting = ContactFormState::Idle.next(ContactEvent::Submit { valid: true }, vec![]);
        assert_eq!(submitting, ContactFormState::Submitting);

        let sent = submitting.next(ContactEvent::Delivered, vec![]);
        assert!(sent.is_sent());
        assert_eq!(sent.next(ContactEvent::Reset, vec![]), ContactFormState::Idle);

        let error = FieldError {
            field: ContactField::Name,
            message: "Please enter your name.",
        };
        let invalid = ContactFormState::Idle
            .next(ContactEvent::Submit { valid: false }, vec![error.clone()]);
        assert_eq!(invalid.errors(), &[error]);
        assert_eq!(
            invalid.next(ContactEvent::Submit { valid: true }, vec![]),
            ContactFormState::Submitting
        );
    }

    #[test]
    fn unexpected_events_keep_state() {
        assert_eq!(
            ContactFormState::Idle.next(ContactEvent::Delivered, vec![]),
            ContactFormState::Idle
        );
        assert_eq!(
            ContactFormState::Submitting.next(ContactEvent::Submit { valid: true }, vec![]),
            ContactFormState::Submitting
        );
    }

    #[tokio::test(start_paused = true)]
    async fn submit_waits_then_succeeds() {
        let service = ContactService::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let state = service.submit(&valid_form()).await;

        assert!(state.is_sent());
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn invalid_submit_returns_errors_immediately() {
        let service = ContactService::new(Duration::from_secs(60));
        let state = service.submit(&ContactForm::default()).await;

        assert_eq!(state.errors().len(), 4);
    }
}
