//! # palette-client
//!
//! HTTP implementation of [`ServiceClient`](palette_core::ServiceClient) for
//! the agent service.
//!
//! ## Module Overview
//!
//! - [`http`]: [`HttpServiceClient`] over `reqwest`
//! - [`errors`]: [`ClientError`] and its mapping into
//!   [`PaletteError`](palette_core::PaletteError)
//!
//! ## Crate Position
//!
//! Depends on: palette-core, palette-settings.
//! Depended on by: palette-cli.

#![deny(unsafe_code)]

pub mod errors;
pub mod http;

pub use errors::{ClientError, Result};
pub use http::HttpServiceClient;
