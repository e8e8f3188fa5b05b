//! Rich picker backend.
//!
//! Drives a picker engine that supports native group titles, per-span
//! highlighting, and a preview pane with positioned style overlays. The
//! adapter only builds rows; searching and drawing belong to the engine.

use std::sync::Arc;

use palette_core::{ItemKind, PreviewAnnotation, Result, SelectableItem, Selection, StyledSpan};
use serde_json::Value;
use tracing::debug;

use crate::backend::{BackendKind, PickerBackend};
use crate::layout::{NAME_COLUMN, pad_right};

/// Highlight group for section titles.
pub const TITLE_STYLE: &str = "PaletteTitle";
/// Highlight group for the padded entry name.
pub const NAME_STYLE: &str = "PaletteName";
/// Highlight group for command and provider descriptions.
pub const DESCRIPTION_STYLE: &str = "PaletteDescription";
/// Highlight group for the follow-up input marker.
pub const ELLIPSIS_STYLE: &str = "PaletteEllipsis";
/// Text shown in the preview pane for entries without a preview.
pub const NO_PREVIEW: &str = "No preview";

/// What the preview pane shows for a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    /// Nothing at all (group rows).
    Empty,
    /// A placeholder message.
    Placeholder(String),
    /// Rendered text with style overlays.
    Text {
        /// Preview text.
        text: String,
        /// Positioned style overlays.
        annotations: Vec<PreviewAnnotation>,
    },
}

impl Preview {
    /// Plain text the pane displays.
    pub fn text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Placeholder(text) | Self::Text { text, .. } => text,
        }
    }
}

/// One row handed to the rich engine, positionally aligned with the items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RichRow {
    /// Whether the row is a section title (not selectable).
    pub is_title: bool,
    /// Styled segments in display order.
    pub segments: Vec<StyledSpan>,
    /// Preview pane content.
    pub preview: Preview,
}

/// Third-party rich picker engine.
pub trait RichPicker: Send + Sync {
    /// Whether the engine is installed in this host.
    fn is_installed(&self) -> bool {
        true
    }

    /// Show `rows` and return the 0-based position chosen, or `None`.
    fn pick(&self, rows: &[RichRow], options: &Value) -> Result<Option<usize>>;
}

/// Build the rich row for one item.
pub fn build_rich_row(item: &SelectableItem) -> RichRow {
    let name = || StyledSpan::new(pad_right(&item.display_name, NAME_COLUMN), NAME_STYLE);

    match &item.kind {
        ItemKind::Group(section) => RichRow {
            is_title: true,
            segments: vec![StyledSpan::new(section.label(), TITLE_STYLE)],
            preview: Preview::Empty,
        },
        ItemKind::Prompt(prompt) => {
            let mut segments = vec![name()];
            segments.extend(prompt.highlight_spans.iter().cloned());
            if prompt.requires_followup_input {
                segments.push(StyledSpan::new("…", ELLIPSIS_STYLE));
            }
            let preview = if prompt.preview_text.is_empty() {
                Preview::Placeholder(NO_PREVIEW.to_string())
            } else {
                Preview::Text {
                    text: prompt.preview_text.clone(),
                    annotations: prompt.preview_annotations.clone(),
                }
            };
            RichRow {
                is_title: false,
                segments,
                preview,
            }
        }
        ItemKind::Command(_) | ItemKind::Provider(_) => RichRow {
            is_title: false,
            segments: vec![name(), StyledSpan::new(item.text(), DESCRIPTION_STYLE)],
            preview: Preview::Placeholder(NO_PREVIEW.to_string()),
        },
    }
}

/// Adapter over a [`RichPicker`] engine.
pub struct RichBackend {
    engine: Arc<dyn RichPicker>,
}

impl RichBackend {
    /// Wrap an engine.
    pub fn new(engine: Arc<dyn RichPicker>) -> Self {
        Self { engine }
    }
}

impl PickerBackend for RichBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Rich
    }

    fn is_available(&self) -> bool {
        self.engine.is_installed()
    }

    fn pick(&self, items: &[SelectableItem], options: &Value) -> Result<Selection> {
        let rows: Vec<RichRow> = items.iter().map(build_rich_row).collect();
        let picked = self.engine.pick(&rows, options)?;
        if picked.and_then(|pos| rows.get(pos)).is_some_and(|row| row.is_title) {
            debug!("engine returned a title row, treating as cancel");
        }
        Ok(Selection::from_position(items, picked))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use palette_core::items::assemble;
    use palette_core::{CommandEntry, PromptEntry, Section};
    use parking_lot::Mutex;

    use super::*;

    struct RecordingEngine {
        installed: bool,
        answer: Option<usize>,
        rows: Mutex<Vec<RichRow>>,
    }

    impl RichPicker for RecordingEngine {
        fn is_installed(&self) -> bool {
            self.installed
        }

        fn pick(&self, rows: &[RichRow], _options: &Value) -> Result<Option<usize>> {
            *self.rows.lock() = rows.to_vec();
            Ok(self.answer)
        }
    }

    fn engine(answer: Option<usize>) -> Arc<RecordingEngine> {
        Arc::new(RecordingEngine {
            installed: true,
            answer,
            rows: Mutex::new(Vec::new()),
        })
    }

    fn prompt(name: &str, ask: bool, preview: &str) -> SelectableItem {
        SelectableItem::prompt(PromptEntry {
            name: name.into(),
            raw_template: "Explain @this".into(),
            requires_followup_input: ask,
            auto_submit: false,
            highlight_spans: vec![
                StyledSpan::new("Explain ", "PaletteText"),
                StyledSpan::new("@this", "PaletteVariable"),
            ],
            preview_text: preview.into(),
            preview_annotations: vec![PreviewAnnotation {
                start_line: 0,
                start_col: 8,
                end_line: 0,
                end_col: 15,
                style: "PaletteVariable".into(),
            }],
        })
    }

    fn items() -> Vec<SelectableItem> {
        assemble(vec![
            vec![
                SelectableItem::group(Section::Prompt),
                prompt("ask", true, "Explain main.rs"),
                prompt("explain", false, ""),
            ],
            vec![
                SelectableItem::group(Section::Command),
                SelectableItem::command(CommandEntry {
                    name: "session.new".into(),
                    description: "Start a new session".into(),
                }),
            ],
        ])
    }

    #[test]
    fn group_row_is_title_with_empty_preview() {
        let row = build_rich_row(&SelectableItem::group(Section::Prompt));
        assert!(row.is_title);
        assert_eq!(row.segments, vec![StyledSpan::new("PROMPT", TITLE_STYLE)]);
        assert_eq!(row.preview, Preview::Empty);
        assert_eq!(row.preview.text(), "");
    }

    #[test]
    fn prompt_row_prefixes_name_and_marks_ask() {
        let items = items();
        let row = build_rich_row(&items[1]);
        assert_eq!(row.segments[0], StyledSpan::new(pad_right("ask", NAME_COLUMN), NAME_STYLE));
        assert_eq!(row.segments[1].style, "PaletteText");
        assert_eq!(row.segments[2].text, "@this");
        assert_eq!(row.segments.last().unwrap(), &StyledSpan::new("…", ELLIPSIS_STYLE));
        assert_matches!(&row.preview, Preview::Text { text, annotations } if text == "Explain main.rs" && annotations.len() == 1);
    }

    #[test]
    fn prompt_without_ask_or_preview() {
        let items = items();
        let row = build_rich_row(&items[2]);
        assert_eq!(row.segments.len(), 3);
        assert!(row.segments.iter().all(|s| s.style != ELLIPSIS_STYLE));
        assert_eq!(row.preview, Preview::Placeholder(NO_PREVIEW.into()));
    }

    #[test]
    fn command_row_shows_description() {
        let items = items();
        let row = build_rich_row(&items[4]);
        assert_eq!(row.segments[1], StyledSpan::new("Start a new session", DESCRIPTION_STYLE));
        assert_eq!(row.preview.text(), NO_PREVIEW);
    }

    #[test]
    fn pick_maps_position_to_selection() {
        let items = items();
        let engine = engine(Some(4));
        let backend = RichBackend::new(engine.clone());
        let selection = backend.pick(&items, &Value::Null).unwrap();
        assert_matches!(selection, Selection::Command(c) if c.name == "session.new");
        assert_eq!(engine.rows.lock().len(), items.len());
    }

    #[test]
    fn title_pick_is_cancel() {
        let backend = RichBackend::new(engine(Some(0)));
        assert!(backend.pick(&items(), &Value::Null).unwrap().is_cancelled());
    }

    #[test]
    fn availability_follows_engine() {
        let backend = RichBackend::new(Arc::new(RecordingEngine {
            installed: false,
            answer: None,
            rows: Mutex::new(Vec::new()),
        }));
        assert!(!backend.is_available());
    }
}
