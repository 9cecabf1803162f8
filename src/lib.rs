pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::BackendClient;
pub use config::BackendConfig;
pub use crate::core::{
    form::LeadForm,
    store::{SessionLeadStore, SharedLeadStore},
    validator::validate,
    workflow::{NotificationOutcome, SubmissionOutcome, SubmissionWorkflow, WorkflowState},
};
pub use domain::model::{Field, Industry, Lead, LeadInput, ValidationError};
pub use utils::error::{GatewayError, LeadError, Result};
