//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and implement
//! [`Default`] with production defaults. Types marked `#[serde(default)]`
//! accept partial JSON.

mod selection;
mod service;

pub use selection::*;
pub use service::*;

use std::collections::BTreeMap;

use palette_core::PromptConfig;
use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "select": { "backend": "rich", "sections": { "provider": false } },
///   "prompts": { "explain": { "prompt": "Explain @this", "submit": true } },
///   "server": { "url": "http://127.0.0.1:4096" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteSettings {
    /// Process-wide selection defaults.
    pub select: SelectionConfig,
    /// Prompt templates keyed by name.
    pub prompts: BTreeMap<String, PromptConfig>,
    /// Statically known commands: name to description.
    pub commands: BTreeMap<String, String>,
    /// Service backend the provider section controls.
    pub provider: ProviderSettings,
    /// Agent service connection settings.
    pub server: ServerSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            select: SelectionConfig::default(),
            prompts: default_prompts(),
            commands: default_commands(),
            provider: ProviderSettings::default(),
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level for the stderr subscriber.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn prompt(template: &str, ask: bool, submit: bool) -> PromptConfig {
    PromptConfig {
        prompt: template.to_string(),
        ask,
        submit,
        description: None,
    }
}

fn default_prompts() -> BTreeMap<String, PromptConfig> {
    [
        ("ask", prompt("@this: ", true, true)),
        ("explain", prompt("Explain @this and its context", false, true)),
        ("review", prompt("Review @this for correctness and readability", false, true)),
        ("fix", prompt("Fix @diagnostics", false, true)),
        ("document", prompt("Add comments documenting @this", false, true)),
        ("test", prompt("Add tests for @this", false, true)),
        ("implement", prompt("Implement @this", false, false)),
        ("diff", prompt("Review the following diff for correctness and readability: @diff", false, true)),
    ]
    .into_iter()
    .map(|(name, cfg)| (name.to_string(), cfg))
    .collect()
}

fn default_commands() -> BTreeMap<String, String> {
    [
        ("session.new", "Start a new session"),
        ("session.list", "List sessions"),
        ("session.share", "Share the current session"),
        ("session.interrupt", "Interrupt the running session"),
        ("session.compact", "Compact the current session"),
        ("session.undo", "Undo the last action"),
        ("session.redo", "Redo the last undone action"),
        ("agent.cycle", "Cycle the selected agent"),
        ("prompt.submit", "Submit the current prompt"),
        ("prompt.clear", "Clear the current prompt"),
    ]
    .into_iter()
    .map(|(name, description)| (name.to_string(), description.to_string()))
    .collect()
}
