//! REST client for the obituary publishing endpoint.
//!
//! Wraps `POST /v1/obituaries/` using [`reqwest`]. One request per
//! call: no retries, no timeout override, no idempotency key.

use obitpub_core::Environment;
use serde::Serialize;
use serde_json::Value;

use crate::endpoints::Routing;
use crate::error::{error_message, PublishError};
use crate::response::PublishResponse;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the publishing API.
pub struct PublishClient {
    client: reqwest::Client,
    routing: Routing,
}

impl PublishClient {
    /// Create a client resolving base URLs from `routing`.
    pub fn new(routing: Routing) -> Self {
        Self {
            client: reqwest::Client::new(),
            routing,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, routing: Routing) -> Self {
        Self { client, routing }
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Full endpoint URL the client posts to for `environment`.
    pub fn endpoint_url(&self, environment: Environment) -> String {
        self.routing.endpoint_url(environment)
    }

    /// Publish an obituary.
    ///
    /// Fails locally, without touching the network, when `api_key` is
    /// blank or `payload` serializes to `null`. Returns the parsed
    /// success body, or a [`PublishError::Api`] carrying the status and
    /// the best message the server offered.
    pub async fn publish<T>(
        &self,
        api_key: &str,
        environment: Environment,
        payload: &T,
    ) -> Result<PublishResponse, PublishError>
    where
        T: Serialize + ?Sized,
    {
        if api_key.trim().is_empty() {
            return Err(PublishError::MissingApiKey);
        }

        let body = serde_json::to_value(payload)?;
        if body.is_null() {
            return Err(PublishError::MissingPayload);
        }

        let url = self.endpoint_url(environment);
        tracing::info!(environment = %environment, url = %url, "Publishing obituary");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Publish request failed");
                PublishError::from(e)
            })?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`PublishError::Api`], or decode a
    /// successful body.
    async fn parse_response(response: reqwest::Response) -> Result<PublishResponse, PublishError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = error_message(status, body.as_ref());
            tracing::warn!(status = status.as_u16(), message = %message, "Publish rejected");
            return Err(PublishError::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: PublishResponse = serde_json::from_slice(&bytes)
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
        tracing::info!(
            obituary_id = parsed.obituary_id.as_deref().unwrap_or("-"),
            warnings = parsed.warnings.len(),
            "Obituary published"
        );
        Ok(parsed)
    }
}
