//! Settings error types.

use palette_core::PaletteError;
use thiserror::Error;

/// Errors that can occur when loading or resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse or convert settings JSON.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A settings value was invalid.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

impl From<SettingsError> for PaletteError {
    fn from(err: SettingsError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
