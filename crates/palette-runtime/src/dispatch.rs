//! Choice dispatch.
//!
//! Cancelling resumes the host; any real choice clears the context first and
//! then runs exactly one action.

use std::collections::BTreeMap;

use palette_core::{
    PaletteActions, PaletteError, PromptConfig, ProviderAction, RenderContext, Result, Selection,
};
use tracing::{debug, info};

/// Route `selection` to the matching action handler.
pub async fn dispatch(
    selection: Selection,
    prompts: &BTreeMap<String, PromptConfig>,
    ctx: &RenderContext,
    actions: &dyn PaletteActions,
) -> Result<()> {
    if selection.is_cancelled() {
        debug!("palette cancelled");
        ctx.resume();
        return Ok(());
    }

    ctx.clear();

    match selection {
        Selection::Cancelled => Ok(()),
        Selection::Prompt(entry) => {
            let config = prompts
                .get(&entry.name)
                .ok_or_else(|| PaletteError::UnknownPrompt(entry.name.clone()))?;
            info!(prompt = %entry.name, ask = config.ask, "running prompt");
            if entry.requires_followup_input {
                actions.run_ask(&config.prompt, config, ctx).await
            } else {
                actions.run_prompt(&config.prompt, config, ctx).await
            }
        }
        Selection::Command(entry) => {
            info!(command = %entry.name, "running command");
            actions.run_named_command(&entry.name).await
        }
        Selection::Provider(entry) => {
            info!(action = entry.action.name(), "running provider action");
            match entry.action {
                ProviderAction::Toggle => actions.toggle_service().await,
                ProviderAction::Start => actions.start_service().await,
                ProviderAction::Stop => actions.stop_service().await,
            }
        }
    }
}
