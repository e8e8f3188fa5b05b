//! # palette-core
//!
//! Foundation types for the palette picker.
//!
//! ## Module Overview
//!
//! - [`items`]: The flat, sectioned item list ([`SelectableItem`]) and the
//!   [`Selection`] handed to the dispatcher
//! - [`sort`]: Deterministic ordering rules per section
//! - [`types`]: Wire types for agents, custom commands, prompts, and
//!   rendered template output
//! - [`context`]: Per-invocation rendering context with resume/clear hooks
//! - [`traits`]: Collaborator seams (service client, renderer, actions,
//!   notifier)
//! - [`errors`]: [`PaletteError`] taxonomy
//! - [`logging`]: `tracing` subscriber setup and test capture utilities
//!
//! ## Crate Position
//!
//! Standalone (no palette crate dependencies).
//! Depended on by: every other palette crate.

#![deny(unsafe_code)]

pub mod context;
pub mod errors;
pub mod items;
pub mod logging;
pub mod sort;
pub mod traits;
pub mod types;

pub use context::{ContextHooks, NoopHooks, RenderContext};
pub use errors::{PaletteError, Result};
pub use items::{
    CommandEntry, ItemKind, PromptEntry, ProviderAction, ProviderEntry, Section, SelectableItem,
    Selection,
};
pub use traits::{Notifier, NotifyLevel, PaletteActions, ServiceClient, TemplateRenderer};
pub use types::{
    Agent, AgentMode, ConnectionHandle, CustomCommand, PreviewAnnotation, PreviewBuffer,
    PromptConfig, RenderedTemplate, StyledSpan,
};
