//! Agent service and provider backend settings.

use serde::{Deserialize, Serialize};

/// Connection settings for the agent service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Base URL of the service HTTP API.
    pub url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:4096".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Service backend controlled by the provider section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// Process to manage. `None` hides the provider section entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<ServiceBackendSettings>,
}

impl ProviderSettings {
    /// Whether a service backend is configured.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }
}

/// A service process launched and stopped by provider actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackendSettings {
    /// Executable to run.
    pub command: String,
    /// Arguments passed to the executable.
    #[serde(default)]
    pub args: Vec<String>,
}
