use crate::config::BackendConfig;
use crate::domain::model::{ConfirmationRequest, LeadRow};
use crate::domain::ports::{NotificationGateway, PersistenceGateway};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

/// Error body returned by the hosted backend.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

/// HTTP client for the hosted backend: the REST table API and the
/// functions runtime share the project URL and API key.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.url().to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn function_url(&self, function: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, function)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
    }

    async fn rejection(response: Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read error body (status {}): {}", status, e);
                String::new()
            }
        };

        let message = serde_json::from_str::<BackendErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message.or(parsed.error).or(parsed.msg))
            .unwrap_or(body);

        GatewayError::Rejected { status, message }
    }
}

#[async_trait]
impl PersistenceGateway for BackendClient {
    async fn insert(
        &self,
        table: &str,
        rows: &[LeadRow],
    ) -> std::result::Result<serde_json::Value, GatewayError> {
        let url = self.table_url(table);
        tracing::debug!("Inserting {} row(s) via POST {}", rows.len(), url);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;

        tracing::debug!("Insert response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        // The row is written once the status is 2xx; the echo is informational.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read insert response body: {}", e);
                return Ok(serde_json::Value::Null);
            }
        };
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::debug!("Insert response body is not JSON ({}); keeping it as text", e);
            serde_json::Value::String(body)
        }))
    }
}

#[async_trait]
impl NotificationGateway for BackendClient {
    async fn invoke(
        &self,
        function: &str,
        body: &ConfirmationRequest,
    ) -> std::result::Result<(), GatewayError> {
        let url = self.function_url(function);
        tracing::debug!("Invoking function via POST {}", url);

        let response = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        tracing::debug!("Function response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }
}
