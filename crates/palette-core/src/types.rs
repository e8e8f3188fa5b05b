//! Wire and rendering types shared across the palette crates.
//!
//! Service payloads use `camelCase` serde renaming to match the JSON API of
//! the backing agent service.

use serde::{Deserialize, Serialize};

/// Opaque handle to an established service connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionHandle {
    /// Base URL all resource requests are issued against.
    pub base_url: String,
}

/// How an agent participates in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Top-level agent the user talks to directly.
    #[default]
    Primary,
    /// Agent that can be mentioned from a prompt.
    Subagent,
    /// Usable both ways.
    All,
    /// Any mode this client does not know about.
    #[serde(other)]
    Unknown,
}

/// An agent record as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Agent name, used as the `@mention` token.
    pub name: String,
    /// Agent mode.
    #[serde(default)]
    pub mode: AgentMode,
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Agent {
    /// Whether this agent can be mentioned from a prompt.
    pub fn is_subagent(&self) -> bool {
        self.mode == AgentMode::Subagent
    }
}

/// A custom command defined on the service side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCommand {
    /// Command name (invoked as `/name`).
    pub name: String,
    /// Optional description shown in the picker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user-configured prompt template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptConfig {
    /// Raw template text, may contain `@placeholders`.
    pub prompt: String,
    /// Collect follow-up input from the user before sending.
    pub ask: bool,
    /// Send immediately without confirmation.
    pub submit: bool,
    /// Optional description (not shown in the list; kept for hosts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A run of text with a named highlight style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// Text content.
    pub text: String,
    /// Highlight group name.
    pub style: String,
}

impl StyledSpan {
    /// Build a span from anything string-like.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }
}

/// A positioned style overlay on preview text.
///
/// Lines are 0-based; columns are 0-based byte offsets with an exclusive end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewAnnotation {
    /// First line of the range.
    pub start_line: usize,
    /// First column of the range.
    pub start_col: usize,
    /// Last line of the range.
    pub end_line: usize,
    /// Column one past the end of the range.
    pub end_col: usize,
    /// Highlight group name.
    pub style: String,
}

/// Fully rendered preview text with its overlays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewBuffer {
    /// Rendered text (may span multiple lines).
    pub text: String,
    /// Style overlays in ascending position order.
    pub annotations: Vec<PreviewAnnotation>,
}

impl PreviewBuffer {
    /// Preview text split on `\n`. A trailing newline yields a final empty
    /// line, so every annotation position has a line to land on.
    pub fn lines(&self) -> Vec<String> {
        self.text.split('\n').map(str::to_owned).collect()
    }
}

/// Output of rendering one prompt template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedTemplate {
    /// Inline highlight spans for the picker row.
    pub input_spans: Vec<StyledSpan>,
    /// Full preview of the resolved prompt.
    pub output: PreviewBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_mode_deserializes_known_and_unknown() {
        let agents: Vec<Agent> = serde_json::from_str(
            r#"[
                {"name": "build", "mode": "primary"},
                {"name": "explore", "mode": "subagent"},
                {"name": "general", "mode": "all"},
                {"name": "future", "mode": "background"},
                {"name": "bare"}
            ]"#,
        )
        .unwrap();
        let modes: Vec<AgentMode> = agents.iter().map(|a| a.mode).collect();
        assert_eq!(
            modes,
            vec![
                AgentMode::Primary,
                AgentMode::Subagent,
                AgentMode::All,
                AgentMode::Unknown,
                AgentMode::Primary,
            ]
        );
        assert!(agents[1].is_subagent());
        assert!(!agents[2].is_subagent());
    }

    #[test]
    fn custom_command_description_optional() {
        let cmd: CustomCommand = serde_json::from_str(r#"{"name": "init"}"#).unwrap();
        assert_eq!(cmd.name, "init");
        assert!(cmd.description.is_none());
    }

    #[test]
    fn prompt_config_partial_json() {
        let cfg: PromptConfig = serde_json::from_str(r#"{"prompt": "Explain @this", "ask": true}"#).unwrap();
        assert!(cfg.ask);
        assert!(!cfg.submit);
        assert_eq!(cfg.prompt, "Explain @this");
    }

    #[test]
    fn preview_lines_split() {
        let buf = PreviewBuffer {
            text: "one\ntwo".into(),
            annotations: Vec::new(),
        };
        assert_eq!(buf.lines(), vec!["one", "two"]);

        let trailing = PreviewBuffer {
            text: "one\n".into(),
            annotations: Vec::new(),
        };
        assert_eq!(trailing.lines(), vec!["one", ""]);
    }
}
