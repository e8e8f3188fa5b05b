//! Host-native fallback backend.
//!
//! Renders every row as a single line of text and hands the lines to the
//! host's own choice prompt. No preview, no styling. Entry rows are indented
//! so that the host's `N:` prefixes right-align.

use std::sync::Arc;

use palette_core::items::digit_width;
use palette_core::{ItemKind, Result, SelectableItem, Selection};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::backend::{BackendKind, PickerBackend, parse_options};
use crate::layout::{DEFAULT_DIVIDER_WIDTH, NAME_COLUMN, centered_divider, pad_right};

/// The host's blocking choice primitive.
pub trait HostSelect: Send + Sync {
    /// Show `rows` under `prompt` and return the 0-based position picked,
    /// or `None` when dismissed.
    fn select(&self, prompt: &str, rows: &[String]) -> Result<Option<usize>>;
}

/// Options read from the native option bag.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeOptions {
    /// Prompt shown above the list.
    pub prompt: String,
    /// Width of group dividers in cells.
    pub divider_width: usize,
}

impl Default for NativeOptions {
    fn default() -> Self {
        Self {
            prompt: "Palette".to_string(),
            divider_width: DEFAULT_DIVIDER_WIDTH,
        }
    }
}

/// Format one row for the host select.
pub fn format_native_row(item: &SelectableItem, total: usize, divider_width: usize) -> String {
    match &item.kind {
        ItemKind::Group(section) => centered_divider(section.label(), divider_width),
        _ => {
            let indent = digit_width(total).saturating_sub(digit_width(item.index));
            format!(
                "{}{}{}",
                " ".repeat(indent),
                pad_right(&format!("[{}]", item.display_name), NAME_COLUMN),
                item.text()
            )
        }
    }
}

/// Adapter over a [`HostSelect`].
pub struct NativeBackend {
    host: Arc<dyn HostSelect>,
}

impl NativeBackend {
    /// Wrap the host's select primitive.
    pub fn new(host: Arc<dyn HostSelect>) -> Self {
        Self { host }
    }
}

impl PickerBackend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn pick(&self, items: &[SelectableItem], options: &Value) -> Result<Selection> {
        let opts: NativeOptions = parse_options(self.kind(), options)?;

        let rows: Vec<String> = items
            .iter()
            .map(|item| format_native_row(item, items.len(), opts.divider_width))
            .collect();

        let picked = self.host.select(&opts.prompt, &rows)?;
        if picked.and_then(|pos| items.get(pos)).is_some_and(SelectableItem::is_group) {
            debug!("divider row picked, treating as cancel");
        }
        Ok(Selection::from_position(items, picked))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use palette_core::items::assemble;
    use palette_core::{CommandEntry, PaletteError, ProviderAction, Section};
    use parking_lot::Mutex;

    use super::*;

    struct ScriptedHost {
        answer: Option<usize>,
        seen: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedHost {
        fn answering(answer: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl HostSelect for ScriptedHost {
        fn select(&self, prompt: &str, rows: &[String]) -> Result<Option<usize>> {
            self.seen.lock().push((prompt.to_string(), rows.to_vec()));
            Ok(self.answer)
        }
    }

    fn command(name: &str, description: &str) -> SelectableItem {
        SelectableItem::command(CommandEntry {
            name: name.into(),
            description: description.into(),
        })
    }

    fn sample() -> Vec<SelectableItem> {
        let mut commands = vec![SelectableItem::group(Section::Command)];
        commands.extend((0..9).map(|i| command(&format!("cmd{i}"), "run it")));
        assemble(vec![
            commands,
            vec![
                SelectableItem::group(Section::Provider),
                SelectableItem::provider(ProviderAction::Toggle.into()),
            ],
        ])
    }

    #[test]
    fn entry_rows_align_on_digit_width() {
        let items = sample();
        assert_eq!(items.len(), 12);
        // index 2 of 12 gets one space, index 12 of 12 none
        assert_eq!(
            format_native_row(&items[1], items.len(), 40),
            format!(" {}run it", pad_right("[cmd0]", NAME_COLUMN))
        );
        assert_eq!(
            format_native_row(&items[11], items.len(), 40),
            format!("{}Toggle the service", pad_right("[toggle]", NAME_COLUMN))
        );
    }

    #[test]
    fn group_rows_are_dividers() {
        let items = sample();
        let row = format_native_row(&items[0], items.len(), 20);
        assert_eq!(row, "───── COMMAND ──────");
    }

    #[test]
    fn pick_returns_chosen_entry_and_passes_prompt() {
        let items = sample();
        let host = ScriptedHost::answering(Some(3));
        let backend = NativeBackend::new(host.clone());

        let selection = backend
            .pick(&items, &serde_json::json!({"prompt": "Choose"}))
            .unwrap();
        assert_matches!(selection, Selection::Command(c) if c.name == "cmd2");

        let seen = host.seen.lock();
        assert_eq!(seen[0].0, "Choose");
        assert_eq!(seen[0].1.len(), items.len());
    }

    #[test]
    fn dismiss_and_divider_are_cancel() {
        let items = sample();
        let dismissed = NativeBackend::new(ScriptedHost::answering(None));
        assert!(dismissed.pick(&items, &Value::Null).unwrap().is_cancelled());

        let divider = NativeBackend::new(ScriptedHost::answering(Some(0)));
        assert!(divider.pick(&items, &serde_json::json!({})).unwrap().is_cancelled());
    }

    #[test]
    fn bad_options_are_rejected() {
        let backend = NativeBackend::new(ScriptedHost::answering(None));
        let err = backend
            .pick(&sample(), &serde_json::json!({"dividerWidth": "wide"}))
            .unwrap_err();
        assert_matches!(err, PaletteError::InvalidConfig(_));
    }
}
