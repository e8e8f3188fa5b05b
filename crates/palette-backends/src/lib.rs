//! # palette-backends
//!
//! Presentation backends for the palette picker.
//!
//! A backend takes the flat item list and returns exactly one
//! [`Selection`](palette_core::Selection). Each adapter wraps a host-provided
//! engine trait, so the crate itself draws nothing.
//!
//! ## Module Overview
//!
//! - [`backend`]: [`PickerBackend`] capability descriptor and [`BackendKind`]
//! - [`registry`]: [`BackendRegistry`] and the pure [`resolve_backend`]
//! - [`native`]: Host select with divider rows and aligned columns
//! - [`rich`]: Styled segments, native titles, preview pane overlays
//! - [`list`]: Row formatter and preview callback, no span styling
//! - [`layout`]: Cell-width padding and dividers
//!
//! ## Crate Position
//!
//! Depends on: palette-core.
//! Depended on by: palette-runtime, palette-cli.

#![deny(unsafe_code)]

pub mod backend;
pub mod layout;
pub mod list;
pub mod native;
pub mod registry;
pub mod rich;

pub use backend::{BackendKind, PickerBackend};
pub use list::{ListBackend, ListPicker, ListPickerSpec, PreviewSink};
pub use native::{HostSelect, NativeBackend};
pub use registry::{BackendRegistry, Resolution, resolve_backend};
pub use rich::{Preview, RichBackend, RichPicker, RichRow};
