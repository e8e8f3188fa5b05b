//! Minimal list picker backend.
//!
//! The engine takes a row formatter and a preview callback instead of
//! pre-built rows. There is no per-span styling: rows are plain strings, and
//! the only decoration happens in the preview buffer.

use std::sync::Arc;

use palette_core::{ItemKind, PreviewAnnotation, Result, SelectableItem, Selection};
use serde_json::Value;

use crate::backend::{BackendKind, PickerBackend};
use crate::layout::{LIST_NAME_COLUMN, pad_right};

/// Preview buffer the list engine exposes to the preview callback.
pub trait PreviewSink {
    /// Replace the whole buffer content.
    fn set_lines(&mut self, lines: Vec<String>);
    /// Add one style overlay.
    fn decorate(&mut self, annotation: &PreviewAnnotation);
    /// Drop every overlay previously added.
    fn clear_decorations(&mut self);
}

/// Row formatter signature.
pub type FormatRow = fn(&SelectableItem) -> String;
/// Preview callback signature.
pub type RenderPreview = fn(&SelectableItem, &mut dyn PreviewSink);

/// Everything the engine needs to show one picker.
pub struct ListPickerSpec<'a> {
    /// Items in display order.
    pub items: &'a [SelectableItem],
    /// Produces each row's text.
    pub format_row: FormatRow,
    /// Fills the preview buffer for the highlighted item.
    pub preview: RenderPreview,
    /// The list option bag, passed through untouched.
    pub options: &'a Value,
}

/// Third-party list picker engine.
pub trait ListPicker: Send + Sync {
    /// Whether the engine is installed in this host.
    fn is_installed(&self) -> bool {
        true
    }

    /// Show the picker and return the 0-based position chosen, or `None`.
    fn pick(&self, spec: &ListPickerSpec<'_>) -> Result<Option<usize>>;
}

/// Format one row: `── NAME ──` for groups, otherwise
/// `name` padded to 16, a two-cell ask indicator, then the text.
pub fn format_list_row(item: &SelectableItem) -> String {
    match &item.kind {
        ItemKind::Group(section) => format!("── {} ──", section.label()),
        _ => {
            let indicator = if item.requires_followup_input() { "… " } else { "  " };
            format!(
                "{}{indicator}{}",
                pad_right(&item.display_name, LIST_NAME_COLUMN),
                item.text()
            )
        }
    }
}

/// Replace the preview buffer with the item's preview.
pub fn render_list_preview(item: &SelectableItem, sink: &mut dyn PreviewSink) {
    sink.clear_decorations();
    match &item.kind {
        ItemKind::Prompt(prompt) if !prompt.preview_text.is_empty() => {
            // Keep a trailing empty line so annotations on it have a target.
            sink.set_lines(prompt.preview_text.split('\n').map(str::to_string).collect());
            for annotation in &prompt.preview_annotations {
                sink.decorate(annotation);
            }
        }
        _ => sink.set_lines(vec![String::new()]),
    }
}

/// Adapter over a [`ListPicker`] engine.
pub struct ListBackend {
    engine: Arc<dyn ListPicker>,
}

impl ListBackend {
    /// Wrap an engine.
    pub fn new(engine: Arc<dyn ListPicker>) -> Self {
        Self { engine }
    }
}

impl PickerBackend for ListBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::List
    }

    fn is_available(&self) -> bool {
        self.engine.is_installed()
    }

    fn pick(&self, items: &[SelectableItem], options: &Value) -> Result<Selection> {
        let spec = ListPickerSpec {
            items,
            format_row: format_list_row,
            preview: render_list_preview,
            options,
        };
        let picked = self.engine.pick(&spec)?;
        Ok(Selection::from_position(items, picked))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use palette_core::items::assemble;
    use palette_core::{PromptEntry, ProviderAction, Section};
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
        decorations: Vec<PreviewAnnotation>,
        clears: usize,
    }

    impl PreviewSink for RecordingSink {
        fn set_lines(&mut self, lines: Vec<String>) {
            self.lines = lines;
        }

        fn decorate(&mut self, annotation: &PreviewAnnotation) {
            self.decorations.push(annotation.clone());
        }

        fn clear_decorations(&mut self) {
            self.decorations.clear();
            self.clears += 1;
        }
    }

    /// Formats every row and previews the answer before returning it.
    struct DrivingEngine {
        answer: Option<usize>,
        rows: Mutex<Vec<String>>,
        options: Mutex<Value>,
    }

    impl ListPicker for DrivingEngine {
        fn pick(&self, spec: &ListPickerSpec<'_>) -> Result<Option<usize>> {
            *self.rows.lock() = spec.items.iter().map(spec.format_row).collect();
            *self.options.lock() = spec.options.clone();
            if let Some(item) = self.answer.and_then(|pos| spec.items.get(pos)) {
                let mut sink = RecordingSink::default();
                (spec.preview)(item, &mut sink);
            }
            Ok(self.answer)
        }
    }

    fn prompt(name: &str, ask: bool, preview: &str) -> SelectableItem {
        SelectableItem::prompt(PromptEntry {
            name: name.into(),
            raw_template: "Fix @diagnostics".into(),
            requires_followup_input: ask,
            auto_submit: !ask,
            highlight_spans: Vec::new(),
            preview_text: preview.into(),
            preview_annotations: vec![PreviewAnnotation {
                start_line: 1,
                start_col: 0,
                end_line: 1,
                end_col: 5,
                style: "PaletteVariable".into(),
            }],
        })
    }

    fn items() -> Vec<SelectableItem> {
        assemble(vec![
            vec![
                SelectableItem::group(Section::Prompt),
                prompt("ask", true, "line one\nerror"),
                prompt("fix", false, ""),
            ],
            vec![
                SelectableItem::group(Section::Provider),
                SelectableItem::provider(ProviderAction::Stop.into()),
            ],
        ])
    }

    #[test]
    fn rows_follow_list_layout() {
        let items = items();
        assert_eq!(format_list_row(&items[0]), "── PROMPT ──");
        assert_eq!(
            format_list_row(&items[1]),
            format!("{}… Fix @diagnostics", pad_right("ask", LIST_NAME_COLUMN))
        );
        assert_eq!(
            format_list_row(&items[2]),
            format!("{}  Fix @diagnostics", pad_right("fix", LIST_NAME_COLUMN))
        );
        assert_eq!(
            format_list_row(&items[4]),
            format!("{}  Stop the service", pad_right("stop", LIST_NAME_COLUMN))
        );
    }

    #[test]
    fn preview_replaces_buffer_and_decorates() {
        let items = items();
        let mut sink = RecordingSink {
            lines: vec!["stale".into()],
            decorations: vec![PreviewAnnotation {
                start_line: 0,
                start_col: 0,
                end_line: 0,
                end_col: 1,
                style: "Old".into(),
            }],
            clears: 0,
        };

        render_list_preview(&items[1], &mut sink);
        assert_eq!(sink.lines, vec!["line one", "error"]);
        assert_eq!(sink.clears, 1);
        assert_eq!(sink.decorations.len(), 1);
        assert_eq!(sink.decorations[0].style, "PaletteVariable");
    }

    #[test]
    fn trailing_newline_keeps_annotated_line() {
        let item = prompt("tail", false, "value\n");
        let mut sink = RecordingSink::default();

        render_list_preview(&item, &mut sink);
        assert_eq!(sink.lines, vec!["value".to_string(), String::new()]);
        assert!(sink.decorations.iter().all(|d| d.end_line < sink.lines.len()));
    }

    #[test]
    fn empty_preview_is_single_blank_line() {
        let items = items();
        for pos in [0, 2, 4] {
            let mut sink = RecordingSink::default();
            render_list_preview(&items[pos], &mut sink);
            assert_eq!(sink.lines, vec![String::new()], "position {pos}");
            assert!(sink.decorations.is_empty());
        }
    }

    #[test]
    fn pick_passes_options_and_maps_choice() {
        let items = items();
        let engine = Arc::new(DrivingEngine {
            answer: Some(4),
            rows: Mutex::new(Vec::new()),
            options: Mutex::new(Value::Null),
        });
        let backend = ListBackend::new(engine.clone());
        let options = serde_json::json!({"height": 12});

        let selection = backend.pick(&items, &options).unwrap();
        assert_matches!(selection, Selection::Provider(p) if p.action == ProviderAction::Stop);
        assert_eq!(engine.rows.lock().len(), items.len());
        assert_eq!(*engine.options.lock(), options);
    }

    #[test]
    fn dismiss_is_cancel() {
        let backend = ListBackend::new(Arc::new(DrivingEngine {
            answer: None,
            rows: Mutex::new(Vec::new()),
            options: Mutex::new(Value::Null),
        }));
        assert!(backend.pick(&items(), &Value::Null).unwrap().is_cancelled());
    }
}
