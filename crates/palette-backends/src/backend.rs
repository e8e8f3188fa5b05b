//! Backend capability descriptor.

use std::fmt;
use std::str::FromStr;

use palette_core::{PaletteError, Result, SelectableItem, Selection};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The presentation backends the palette knows how to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Host-native single-line select; always available.
    Native,
    /// Rich picker with grouping, span highlighting, and a preview pane.
    Rich,
    /// Minimal list picker with a row formatter and preview callback.
    List,
}

impl BackendKind {
    /// Configuration name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Rich => "rich",
            Self::List => "list",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "rich" => Ok(Self::Rich),
            "list" => Ok(Self::List),
            other => Err(PaletteError::BackendUnavailable(other.to_string())),
        }
    }
}

/// A pluggable presentation backend.
///
/// `pick` blocks until the user chooses or dismisses. It returns exactly one
/// [`Selection`]; group rows never come back as a choice.
pub trait PickerBackend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Whether the backend can run in the current host.
    fn is_available(&self) -> bool {
        true
    }

    /// Present `items` and return the user's choice.
    ///
    /// `options` is the backend's passthrough option bag from the selection
    /// configuration.
    fn pick(&self, items: &[SelectableItem], options: &Value) -> Result<Selection>;
}

/// Decode a backend's option bag. `null` yields the defaults.
pub(crate) fn parse_options<T>(kind: BackendKind, options: &Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|e| PaletteError::InvalidConfig(format!("{kind} backend options: {e}")))
}
