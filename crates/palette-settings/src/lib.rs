//! # palette-settings
//!
//! Configuration management with layered sources for the palette picker.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`PaletteSettings::default()`]
//! 2. **User file**: `~/.palette/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `PALETTE_*` overrides (highest priority),
//!    validated together with the merged result
//!
//! A fourth, per-invocation layer is applied by the palette entry point:
//! [`SelectionConfig::with_overrides`] deep-merges the caller's override
//! object over the loaded selection defaults.
//!
//! There is no global settings cache. The binary loads settings once and
//! passes the resolved value down.
//!
//! # Usage
//!
//! ```no_run
//! use palette_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("service: {}", settings.server.url);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
