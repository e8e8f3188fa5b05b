//! Error types for the palette picker.

use thiserror::Error;

/// Errors that can occur while collecting, presenting, or dispatching
/// palette entries.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The backing service could not be reached.
    #[error("failed to connect to service: {0}")]
    Connection(String),

    /// A resource fetch over an established connection failed.
    #[error("failed to fetch {resource}: {message}")]
    Fetch {
        /// Resource being fetched (`agents`, `commands`).
        resource: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The requested picker backend is not present in this host.
    #[error("picker backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A picker backend failed while presenting the list.
    #[error("picker backend failed: {0}")]
    Backend(String),

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// A chosen prompt has no matching configuration.
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),

    /// A dispatched action handler failed.
    #[error("action failed: {0}")]
    Action(String),

    /// The selection configuration could not be resolved.
    #[error("invalid palette configuration: {0}")]
    InvalidConfig(String),
}

impl PaletteError {
    /// Whether this error comes from the source-fetch stage.
    ///
    /// These abort aggregation and are surfaced as a single user-visible
    /// notification instead of propagating to the host.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Fetch { .. })
    }
}

/// Result type for palette operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
