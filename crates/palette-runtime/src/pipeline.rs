//! Item aggregation.
//!
//! Connects to the service, pulls agents and custom commands for the enabled
//! sections, renders every prompt, and assembles the flat item list:
//!
//! ```text
//! connect ─► agents (prompts on) ─► commands (commands on) ─► build sections
//!                                                              │
//!             PROMPT ─► COMMAND ─► PROVIDER ◄──────────────────┘
//! ```
//!
//! Fetches run one after another. The first failure aborts with no partial
//! list.

use std::collections::BTreeMap;

use palette_core::items::assemble;
use palette_core::sort::{sort_commands, sort_prompts};
use palette_core::{
    CommandEntry, CustomCommand, PromptConfig, PromptEntry, ProviderAction, RenderContext, Result,
    Section, SelectableItem, ServiceClient, TemplateRenderer,
};
use palette_settings::SelectionConfig;
use tracing::debug;

/// What the pipeline draws entries from besides the service.
#[derive(Clone, Copy, Debug)]
pub struct Sources<'a> {
    /// Prompt templates keyed by name.
    pub prompts: &'a BTreeMap<String, PromptConfig>,
    /// Static commands: name to description.
    pub commands: &'a BTreeMap<String, String>,
    /// Whether a service backend is configured for the provider section.
    pub provider_configured: bool,
}

/// Collect, render, and order every entry for one palette invocation.
///
/// Subagents fetched for the prompt section are stored in `ctx`.
pub async fn collect_items(
    config: &SelectionConfig,
    sources: Sources<'_>,
    client: &dyn ServiceClient,
    renderer: &dyn TemplateRenderer,
    ctx: &mut RenderContext,
) -> Result<Vec<SelectableItem>> {
    let sections = config.sections;
    let conn = client.connect().await?;
    debug!(url = %conn.base_url, "connected to service");

    if sections.prompts {
        let agents: Vec<_> = client
            .fetch_agents(&conn)
            .await?
            .into_iter()
            .filter(palette_core::Agent::is_subagent)
            .collect();
        debug!(count = agents.len(), "subagents fetched");
        ctx.set_agents(agents);
    }

    let fetched = if sections.commands {
        let commands = client.fetch_commands(&conn).await?;
        debug!(count = commands.len(), "custom commands fetched");
        commands
    } else {
        Vec::new()
    };

    let mut blocks = Vec::with_capacity(3);

    if sections.prompts {
        blocks.push(prompt_section(sources.prompts, renderer, ctx)?);
    }

    if sections.commands {
        blocks.push(command_section(sources.commands, fetched));
    }

    if sections.provider && sources.provider_configured {
        blocks.push(provider_section());
    } else if sections.provider {
        debug!("no service backend configured, provider section skipped");
    }

    let items = assemble(blocks);
    debug!(count = items.len(), "palette items assembled");
    Ok(items)
}

fn prompt_section(
    prompts: &BTreeMap<String, PromptConfig>,
    renderer: &dyn TemplateRenderer,
    ctx: &RenderContext,
) -> Result<Vec<SelectableItem>> {
    let mut entries = Vec::with_capacity(prompts.len());
    for (name, config) in prompts {
        let rendered = renderer.render(ctx, &config.prompt)?;
        entries.push(PromptEntry {
            name: name.clone(),
            raw_template: config.prompt.clone(),
            requires_followup_input: config.ask,
            auto_submit: config.submit,
            highlight_spans: rendered.input_spans,
            preview_text: rendered.output.text,
            preview_annotations: rendered.output.annotations,
        });
    }
    sort_prompts(&mut entries);

    let mut block = vec![SelectableItem::group(Section::Prompt)];
    block.extend(entries.into_iter().map(SelectableItem::prompt));
    Ok(block)
}

/// Merge fetched commands over the static map. A fetched command without a
/// description keeps the static one.
pub fn merge_commands(
    static_commands: &BTreeMap<String, String>,
    fetched: Vec<CustomCommand>,
) -> Vec<CommandEntry> {
    let mut merged = static_commands.clone();
    for command in fetched {
        let slot = merged.entry(command.name).or_default();
        if let Some(description) = command.description {
            *slot = description;
        }
    }

    let mut entries: Vec<CommandEntry> = merged
        .into_iter()
        .map(|(name, description)| CommandEntry { name, description })
        .collect();
    sort_commands(&mut entries);
    entries
}

fn command_section(
    static_commands: &BTreeMap<String, String>,
    fetched: Vec<CustomCommand>,
) -> Vec<SelectableItem> {
    let mut block = vec![SelectableItem::group(Section::Command)];
    block.extend(
        merge_commands(static_commands, fetched)
            .into_iter()
            .map(SelectableItem::command),
    );
    block
}

fn provider_section() -> Vec<SelectableItem> {
    let mut block = vec![SelectableItem::group(Section::Provider)];
    block.extend(
        ProviderAction::ALL
            .into_iter()
            .map(|action| SelectableItem::provider(action.into())),
    );
    block
}
