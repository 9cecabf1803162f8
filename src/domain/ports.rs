use crate::domain::model::{ConfirmationRequest, LeadRow};
use crate::utils::error::GatewayError;
use async_trait::async_trait;

/// Table the lead rows are inserted into.
pub const LEADS_TABLE: &str = "leads";

/// Hosted function that sends the confirmation email.
pub const CONFIRMATION_FUNCTION: &str = "send-confirmation";

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Inserts `rows` into `table`. Any success carries the backend's echo,
    /// whatever its shape; it is not otherwise inspected.
    async fn insert(
        &self,
        table: &str,
        rows: &[LeadRow],
    ) -> Result<serde_json::Value, GatewayError>;
}

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn invoke(&self, function: &str, body: &ConfirmationRequest)
        -> Result<(), GatewayError>;
}
