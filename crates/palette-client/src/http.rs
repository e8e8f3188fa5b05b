//! `reqwest`-backed [`ServiceClient`].

use std::time::Duration;

use async_trait::async_trait;
use palette_core::{Agent, ConnectionHandle, CustomCommand, ServiceClient};
use palette_settings::ServerSettings;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{ClientError, Result};

/// HTTP client for the agent service.
///
/// `connect` checks `GET /config`; agents and commands come from
/// `GET /agent` and `GET /command`.
pub struct HttpServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServiceClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("palette/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from server settings.
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(&settings.url, Duration::from_millis(settings.timeout_ms))
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, base: &str, path: &str) -> Result<T> {
        let url = format!("{base}{path}");
        debug!(%url, "service request");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ServiceClient for HttpServiceClient {
    async fn connect(&self) -> palette_core::Result<ConnectionHandle> {
        let _: serde_json::Value = self
            .get_json(&self.base_url, "/config")
            .await
            .map_err(ClientError::into_connection)?;
        Ok(ConnectionHandle {
            base_url: self.base_url.clone(),
        })
    }

    async fn fetch_agents(&self, conn: &ConnectionHandle) -> palette_core::Result<Vec<Agent>> {
        self.get_json(&conn.base_url, "/agent")
            .await
            .map_err(|e| e.into_fetch("agents"))
    }

    async fn fetch_commands(
        &self,
        conn: &ConnectionHandle,
    ) -> palette_core::Result<Vec<CustomCommand>> {
        self.get_json(&conn.base_url, "/command")
            .await
            .map_err(|e| e.into_fetch("commands"))
    }
}
