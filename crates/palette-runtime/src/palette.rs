//! Palette entry point.
//!
//! One [`Palette::open`] call runs a whole invocation: resolve the selection
//! config, collect items, pick a backend, present, and dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use palette_backends::{BackendKind, BackendRegistry};
use palette_core::{
    ContextHooks, NoopHooks, Notifier, NotifyLevel, PaletteActions, RenderContext, Result,
    ServiceClient, TemplateRenderer,
};
use palette_settings::{BackendOptions, PaletteSettings};
use serde_json::Value;
use tracing::{debug, warn};

use crate::dispatch::dispatch;
use crate::pipeline::{Sources, collect_items};
use crate::template::PlaceholderRenderer;

/// The unified picker.
pub struct Palette {
    settings: PaletteSettings,
    client: Arc<dyn ServiceClient>,
    renderer: Arc<dyn TemplateRenderer>,
    actions: Arc<dyn PaletteActions>,
    notifier: Arc<dyn Notifier>,
    registry: BackendRegistry,
    variables: BTreeMap<String, String>,
    hooks: Arc<dyn ContextHooks>,
}

impl Palette {
    /// Create a palette with the placeholder renderer, no template variables,
    /// and no-op context hooks.
    pub fn new(
        settings: PaletteSettings,
        client: Arc<dyn ServiceClient>,
        actions: Arc<dyn PaletteActions>,
        notifier: Arc<dyn Notifier>,
        registry: BackendRegistry,
    ) -> Self {
        Self {
            settings,
            client,
            renderer: Arc::new(PlaceholderRenderer),
            actions,
            notifier,
            registry,
            variables: BTreeMap::new(),
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Use a different template renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Bind template variables for every invocation.
    #[must_use]
    pub fn with_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.variables = variables;
        self
    }

    /// Install the host's resume/clear hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn ContextHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Resolved settings.
    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    /// Run one palette invocation.
    ///
    /// `overrides` is deep-merged over the configured selection defaults
    /// (`null` for none). A connection or fetch failure is reported through
    /// the notifier and yields `Ok(())`; anything else is returned.
    pub async fn open(&self, overrides: Value) -> Result<()> {
        let config = self.settings.select.with_overrides(overrides)?;
        let mut ctx = RenderContext::new(self.variables.clone(), Arc::clone(&self.hooks));

        let sources = Sources {
            prompts: &self.settings.prompts,
            commands: &self.settings.commands,
            provider_configured: self.settings.provider.is_configured(),
        };

        let items = match collect_items(
            &config,
            sources,
            self.client.as_ref(),
            self.renderer.as_ref(),
            &mut ctx,
        )
        .await
        {
            Ok(items) => items,
            Err(e) if e.is_fetch_failure() => {
                warn!(error = %e, "palette sources unavailable");
                self.notifier.notify(NotifyLevel::Error, &e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let backend = self
            .registry
            .select(config.backend.as_deref(), self.notifier.as_ref());
        debug!(backend = %backend.kind(), items = items.len(), "presenting palette");

        let options = backend_options(&config.backend_options, backend.kind());
        let selection = match backend.pick(&items, options) {
            Ok(selection) => selection,
            Err(e) => {
                // Nothing will be dispatched, so hand the host back its state.
                ctx.resume();
                return Err(e);
            }
        };

        dispatch(selection, &self.settings.prompts, &ctx, self.actions.as_ref()).await
    }
}

fn backend_options(options: &BackendOptions, kind: BackendKind) -> &Value {
    match kind {
        BackendKind::Native => &options.native,
        BackendKind::Rich => &options.rich,
        BackendKind::List => &options.list,
    }
}
