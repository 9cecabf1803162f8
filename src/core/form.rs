use crate::core::store::SharedLeadStore;
use crate::core::workflow::{SubmissionOutcome, SubmissionWorkflow};
use crate::domain::model::{Field, LeadInput, ValidationError};
use crate::domain::ports::{NotificationGateway, PersistenceGateway};

pub const PERSIST_FAILED_NOTICE: &str =
    "There was an error submitting your information. Please try again.";
pub const UNEXPECTED_FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

/// The lead-capture form: entered values, inline errors and the failure
/// notice, backed by a submission workflow.
pub struct LeadForm<P: PersistenceGateway, N: NotificationGateway> {
    input: LeadInput,
    errors: Vec<ValidationError>,
    notice: Option<&'static str>,
    workflow: SubmissionWorkflow<P, N>,
}

impl<P: PersistenceGateway, N: NotificationGateway> LeadForm<P, N> {
    pub fn new(workflow: SubmissionWorkflow<P, N>) -> Self {
        Self {
            input: LeadInput::default(),
            errors: Vec::new(),
            notice: None,
            workflow,
        }
    }

    /// Called whenever the form is shown. Clears the success banner left by
    /// an earlier submission; stored leads are untouched.
    pub fn mount(&mut self) {
        self.workflow.store().set_submitted(false);
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
        self.errors.retain(|e| e.field != field);
    }

    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = self.workflow.submit(&self.input).await;

        match &outcome {
            SubmissionOutcome::Committed { .. } => {
                self.input.clear();
                self.errors.clear();
                self.notice = None;
            }
            SubmissionOutcome::ValidationFailed(errors) => {
                self.errors = errors.clone();
                self.notice = None;
            }
            SubmissionOutcome::PersistFailed(_) => {
                self.notice = Some(PERSIST_FAILED_NOTICE);
            }
            SubmissionOutcome::Unexpected(_) => {
                self.notice = Some(UNEXPECTED_FAILURE_NOTICE);
            }
        }

        outcome
    }

    pub fn input(&self) -> &LeadInput {
        &self.input
    }

    pub fn value(&self, field: Field) -> &str {
        self.input.get(field)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Failure notice that must be shown prominently, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn store(&self) -> &SharedLeadStore {
        self.workflow.store()
    }
}
