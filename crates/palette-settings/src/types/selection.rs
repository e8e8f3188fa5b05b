//! Per-invocation selection settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::loader::deep_merge;

/// Which sections a palette invocation shows, and how.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionConfig {
    /// Section toggles.
    pub sections: SectionToggles,
    /// Preferred backend name (`native`, `rich`, `list`). `None` uses native.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Passthrough options per backend.
    pub backend_options: BackendOptions,
}

impl SelectionConfig {
    /// Deep-merge `overrides` over this configuration.
    ///
    /// `Value::Null` leaves the configuration unchanged.
    pub fn with_overrides(&self, overrides: Value) -> Result<Self> {
        if overrides.is_null() {
            return Ok(self.clone());
        }
        let base = serde_json::to_value(self)?;
        Ok(serde_json::from_value(deep_merge(base, overrides))?)
    }
}

/// Section toggles. All sections are on by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionToggles {
    /// Show configured prompt templates.
    pub prompts: bool,
    /// Show static and service-defined commands.
    pub commands: bool,
    /// Show service lifecycle actions (only when a backend is configured).
    pub provider: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            prompts: true,
            commands: true,
            provider: true,
        }
    }
}

/// Opaque option bags handed to each backend unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendOptions {
    /// Options for the host-native select.
    pub native: Value,
    /// Options for the rich picker.
    pub rich: Value,
    /// Options for the minimal list picker.
    pub list: Value,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            native: Value::Object(serde_json::Map::new()),
            rich: Value::Object(serde_json::Map::new()),
            list: Value::Object(serde_json::Map::new()),
        }
    }
}
