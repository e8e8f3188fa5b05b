//! The canonical selectable item model.
//!
//! A palette invocation produces one flat `Vec<SelectableItem>`: each section
//! starts with a [`ItemKind::Group`] marker followed by that section's entries.
//! Indices are assigned once, after every section has been assembled, by
//! [`assemble`].

use std::fmt;

use crate::types::{PreviewAnnotation, StyledSpan};

/// A named block of entries in the flat list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// User-configured prompt templates.
    Prompt,
    /// Static and service-defined commands.
    Command,
    /// Service backend lifecycle actions.
    Provider,
}

impl Section {
    /// Label rendered on the group marker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt => "PROMPT",
            Self::Command => "COMMAND",
            Self::Provider => "PROVIDER",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle action on the service backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderAction {
    /// Start if stopped, stop if running.
    Toggle,
    /// Start the service.
    Start,
    /// Stop the service.
    Stop,
}

impl ProviderAction {
    /// All actions in their fixed display order.
    pub const ALL: [Self; 3] = [Self::Toggle, Self::Start, Self::Stop];

    /// Short name used as the entry's display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Human-readable description.
    pub fn label(self) -> &'static str {
        match self {
            Self::Toggle => "Toggle the service",
            Self::Start => "Start the service",
            Self::Stop => "Stop the service",
        }
    }
}

/// A rendered prompt template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptEntry {
    /// Key in the prompt configuration map.
    pub name: String,
    /// Template text before rendering.
    pub raw_template: String,
    /// Needs follow-up input before running.
    pub requires_followup_input: bool,
    /// Sent without confirmation.
    pub auto_submit: bool,
    /// Inline highlight spans from the renderer.
    pub highlight_spans: Vec<StyledSpan>,
    /// Fully resolved prompt text.
    pub preview_text: String,
    /// Style overlays on `preview_text`.
    pub preview_annotations: Vec<PreviewAnnotation>,
}

/// A runnable named command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    /// Command name.
    pub name: String,
    /// Description (empty when none is known).
    pub description: String,
}

/// A service lifecycle action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEntry {
    /// Action to perform.
    pub action: ProviderAction,
    /// Human-readable label.
    pub label: String,
}

impl From<ProviderAction> for ProviderEntry {
    fn from(action: ProviderAction) -> Self {
        Self {
            action,
            label: action.label().to_owned(),
        }
    }
}

/// Variant payload of a [`SelectableItem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Section marker; never selectable.
    Group(Section),
    /// Prompt template entry.
    Prompt(PromptEntry),
    /// Named command entry.
    Command(CommandEntry),
    /// Provider lifecycle entry.
    Provider(ProviderEntry),
}

/// One row of the flat palette list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectableItem {
    /// 1-based position in the final list; `0` until [`assemble`] runs.
    pub index: usize,
    /// Name shown in the picker.
    pub display_name: String,
    /// Variant payload.
    pub kind: ItemKind,
}

impl SelectableItem {
    /// Section marker row.
    pub fn group(section: Section) -> Self {
        Self {
            index: 0,
            display_name: section.label().to_owned(),
            kind: ItemKind::Group(section),
        }
    }

    /// Prompt row, displayed under the prompt's name.
    pub fn prompt(entry: PromptEntry) -> Self {
        Self {
            index: 0,
            display_name: entry.name.clone(),
            kind: ItemKind::Prompt(entry),
        }
    }

    /// Command row, displayed under the command's name.
    pub fn command(entry: CommandEntry) -> Self {
        Self {
            index: 0,
            display_name: entry.name.clone(),
            kind: ItemKind::Command(entry),
        }
    }

    /// Provider row, displayed under the action's short name.
    pub fn provider(entry: ProviderEntry) -> Self {
        Self {
            index: 0,
            display_name: entry.action.name().to_owned(),
            kind: ItemKind::Provider(entry),
        }
    }

    /// Whether this row is a section marker.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ItemKind::Group(_))
    }

    /// Whether this row asks for follow-up input once chosen.
    pub fn requires_followup_input(&self) -> bool {
        matches!(&self.kind, ItemKind::Prompt(p) if p.requires_followup_input)
    }

    /// Single-line descriptive text for backends without span styling.
    ///
    /// Prompts show their raw template with whitespace runs collapsed.
    pub fn text(&self) -> String {
        match &self.kind {
            ItemKind::Group(section) => section.label().to_owned(),
            ItemKind::Prompt(p) => p.raw_template.split_whitespace().collect::<Vec<_>>().join(" "),
            ItemKind::Command(c) => c.description.clone(),
            ItemKind::Provider(p) => p.label.clone(),
        }
    }

    /// Convert a chosen row into a dispatchable [`Selection`].
    ///
    /// Returns `None` for group markers, which cannot be chosen.
    pub fn to_selection(&self) -> Option<Selection> {
        match &self.kind {
            ItemKind::Group(_) => None,
            ItemKind::Prompt(p) => Some(Selection::Prompt(p.clone())),
            ItemKind::Command(c) => Some(Selection::Command(c.clone())),
            ItemKind::Provider(p) => Some(Selection::Provider(p.clone())),
        }
    }
}

/// Outcome of a picker interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The user dismissed the picker without choosing.
    Cancelled,
    /// A prompt entry was chosen.
    Prompt(PromptEntry),
    /// A command entry was chosen.
    Command(CommandEntry),
    /// A provider entry was chosen.
    Provider(ProviderEntry),
}

impl Selection {
    /// Selection for the row at `position` (0-based) in `items`.
    ///
    /// Out-of-range positions and group rows resolve to [`Selection::Cancelled`].
    pub fn from_position(items: &[SelectableItem], position: Option<usize>) -> Self {
        position
            .and_then(|pos| items.get(pos))
            .and_then(SelectableItem::to_selection)
            .unwrap_or(Self::Cancelled)
    }

    /// Whether the picker was dismissed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Concatenate section blocks in order and assign indices `1..=N`.
pub fn assemble(blocks: Vec<Vec<SelectableItem>>) -> Vec<SelectableItem> {
    let mut items: Vec<SelectableItem> = blocks.into_iter().flatten().collect();
    for (pos, item) in items.iter_mut().enumerate() {
        item.index = pos + 1;
    }
    items
}

/// Number of decimal digits needed to print `n`.
pub fn digit_width(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
