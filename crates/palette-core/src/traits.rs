//! Collaborator seams for the palette.
//!
//! The palette core never talks to the network, renders templates, or runs
//! actions itself. Hosts provide concrete implementations of these traits;
//! the workspace ships reference implementations in `palette-client`,
//! `palette-runtime::template`, and the `palette` binary.

use async_trait::async_trait;

use crate::context::RenderContext;
use crate::errors::Result;
use crate::types::{Agent, ConnectionHandle, CustomCommand, PromptConfig, RenderedTemplate};

// ─────────────────────────────────────────────────────────────────────────────
// Source fetchers
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the agent service the palette sources entries from.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Establish (or locate) a connection to the service.
    ///
    /// Fails with [`PaletteError::Connection`](crate::PaletteError::Connection)
    /// when the service is unreachable.
    async fn connect(&self) -> Result<ConnectionHandle>;

    /// List the agents known to the service.
    async fn fetch_agents(&self, conn: &ConnectionHandle) -> Result<Vec<Agent>>;

    /// List the custom commands defined on the service.
    async fn fetch_commands(&self, conn: &ConnectionHandle) -> Result<Vec<CustomCommand>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Renders a prompt template into highlight spans and a preview buffer.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `ctx`. Must not mutate host state.
    fn render(&self, ctx: &RenderContext, template: &str) -> Result<RenderedTemplate>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Handlers invoked once the user has chosen an entry.
#[async_trait]
pub trait PaletteActions: Send + Sync {
    /// Run a prompt that collects follow-up input first.
    async fn run_ask(
        &self,
        template: &str,
        prompt: &PromptConfig,
        ctx: &RenderContext,
    ) -> Result<()>;

    /// Run a prompt directly.
    async fn run_prompt(
        &self,
        template: &str,
        prompt: &PromptConfig,
        ctx: &RenderContext,
    ) -> Result<()>;

    /// Run a named command.
    async fn run_named_command(&self, name: &str) -> Result<()>;

    /// Start the service if stopped, stop it if running.
    async fn toggle_service(&self) -> Result<()>;

    /// Start the service.
    async fn start_service(&self) -> Result<()>;

    /// Stop the service.
    async fn stop_service(&self) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────────────────

/// Severity of a user-visible notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotifyLevel {
    /// Informational.
    Info,
    /// Recoverable problem.
    Warn,
    /// Failed operation.
    Error,
}

/// Host notification surface.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    fn notify(&self, level: NotifyLevel, message: &str);
}
