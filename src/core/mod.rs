pub mod form;
pub mod store;
pub mod validator;
pub mod workflow;

pub use crate::domain::model::{
    ConfirmationRequest, Field, Industry, Lead, LeadInput, LeadRow, ValidationError,
};
pub use crate::domain::ports::{NotificationGateway, PersistenceGateway};
pub use crate::utils::error::Result;
