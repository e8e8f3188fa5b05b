//! # palette-runtime
//!
//! Orchestration for the palette picker.
//!
//! ## Module Overview
//!
//! - [`pipeline`]: Async item aggregation (connect, agents, commands) and
//!   section assembly
//! - [`template`]: `@placeholder` renderer producing highlight spans and a
//!   preview buffer
//! - [`dispatch`]: Routes a [`Selection`](palette_core::Selection) to
//!   exactly one action, or resumes on cancel
//! - [`palette`]: [`Palette::open`], the per-invocation entry point
//!
//! ## Crate Position
//!
//! Depends on: palette-core, palette-settings, palette-backends.
//! Depended on by: palette-cli.

#![deny(unsafe_code)]

pub mod dispatch;
pub mod palette;
pub mod pipeline;
pub mod template;

pub use dispatch::dispatch;
pub use palette::Palette;
pub use pipeline::{Sources, collect_items, merge_commands};
pub use template::PlaceholderRenderer;
