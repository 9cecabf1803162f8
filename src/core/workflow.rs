//! Submission saga: validate, persist, notify, commit.
//!
//! The persisted row is the point of no return. Once the insert succeeds the
//! lead is committed to the session store whatever the confirmation email
//! call reports; a failed notification is returned as data, never as a
//! failure of the submission.

use crate::core::store::SharedLeadStore;
use crate::core::validator;
use crate::domain::model::{ConfirmationRequest, Lead, LeadInput, LeadRow, ValidationError};
use crate::domain::ports::{
    NotificationGateway, PersistenceGateway, CONFIRMATION_FUNCTION, LEADS_TABLE,
};
use crate::utils::error::GatewayError;
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validating,
    Persisting,
    Notifying,
    Committed,
    ValidationFailed,
    PersistFailed,
    /// Ended by a failure outside the two known failure points.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed(GatewayError),
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Committed {
        lead: Lead,
        notification: NotificationOutcome,
    },
    ValidationFailed(Vec<ValidationError>),
    PersistFailed(GatewayError),
    Unexpected(GatewayError),
}

impl SubmissionOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SubmissionOutcome::Committed { .. })
    }

    pub fn committed_lead(&self) -> Option<&Lead> {
        match self {
            SubmissionOutcome::Committed { lead, .. } => Some(lead),
            _ => None,
        }
    }
}

pub struct SubmissionWorkflow<P: PersistenceGateway, N: NotificationGateway> {
    persistence: P,
    notification: N,
    store: SharedLeadStore,
    leads_table: String,
    confirmation_function: String,
    state: WorkflowState,
    trail: Vec<WorkflowState>,
}

impl<P: PersistenceGateway, N: NotificationGateway> SubmissionWorkflow<P, N> {
    pub fn new(persistence: P, notification: N, store: SharedLeadStore) -> Self {
        Self {
            persistence,
            notification,
            store,
            leads_table: LEADS_TABLE.to_string(),
            confirmation_function: CONFIRMATION_FUNCTION.to_string(),
            state: WorkflowState::Idle,
            trail: vec![WorkflowState::Idle],
        }
    }

    pub fn with_targets(
        mut self,
        leads_table: impl Into<String>,
        confirmation_function: impl Into<String>,
    ) -> Self {
        self.leads_table = leads_table.into();
        self.confirmation_function = confirmation_function.into();
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// States visited by the most recent submission, starting at `Idle`.
    pub fn trail(&self) -> &[WorkflowState] {
        &self.trail
    }

    pub fn store(&self) -> &SharedLeadStore {
        &self.store
    }

    fn enter(&mut self, next: WorkflowState) {
        tracing::debug!("Submission state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.trail.push(next);
    }

    pub async fn submit(&mut self, input: &LeadInput) -> SubmissionOutcome {
        self.state = WorkflowState::Idle;
        self.trail = vec![WorkflowState::Idle];

        self.enter(WorkflowState::Validating);
        let valid = match validator::check(input) {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!("Submission rejected with {} validation error(s)", errors.len());
                self.enter(WorkflowState::ValidationFailed);
                self.enter(WorkflowState::Idle);
                return SubmissionOutcome::ValidationFailed(errors);
            }
        };

        let row = LeadRow {
            name: valid.name,
            email: valid.email,
            industry: valid.industry,
            submitted_at: Utc::now(),
        };

        self.enter(WorkflowState::Persisting);
        match self
            .persistence
            .insert(&self.leads_table, std::slice::from_ref(&row))
            .await
        {
            Ok(returned) => {
                tracing::debug!("Inserted lead into '{}': {}", self.leads_table, returned);
            }
            Err(err) if err.is_rejection() => {
                tracing::error!("❌ Failed to save lead: {}", err);
                self.enter(WorkflowState::PersistFailed);
                return SubmissionOutcome::PersistFailed(err);
            }
            Err(err) => {
                tracing::error!("❌ Unexpected failure while saving lead: {}", err);
                self.enter(WorkflowState::Failed);
                return SubmissionOutcome::Unexpected(err);
            }
        }

        self.enter(WorkflowState::Notifying);
        let request = ConfirmationRequest::from(&row);
        let notification = match self
            .notification
            .invoke(&self.confirmation_function, &request)
            .await
        {
            Ok(()) => NotificationOutcome::Sent,
            Err(err) => {
                tracing::warn!("Confirmation email for {} not sent: {}", row.email, err);
                NotificationOutcome::Failed(err)
            }
        };

        self.enter(WorkflowState::Committed);
        let lead = Lead::from(&row);
        self.store.add_lead(lead.clone());
        self.store.set_submitted(true);
        tracing::info!("✅ Lead captured: {} ({})", lead.email, lead.industry);

        SubmissionOutcome::Committed { lead, notification }
    }
}
