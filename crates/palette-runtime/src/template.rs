//! `@placeholder` template rendering.
//!
//! Resolves `@name` tokens against the render context. Variables are
//! substituted with their bound value; subagent mentions are kept verbatim
//! but highlighted. Anything else is left as literal text.
//!
//! Like skill references, a token does not start after a word character or a
//! backtick (so `user@example.com` is not a token), and tokens inside inline
//! code are ignored.

use std::sync::LazyLock;

use palette_core::{
    PreviewAnnotation, PreviewBuffer, RenderContext, RenderedTemplate, Result, StyledSpan,
    TemplateRenderer,
};
use regex::Regex;

/// Style for literal template text.
pub const TEXT_STYLE: &str = "PaletteText";
/// Style for resolved variables.
pub const VARIABLE_STYLE: &str = "PaletteVariable";
/// Style for subagent mentions.
pub const AGENT_STYLE: &str = "PaletteAgent";

// A name may contain `.` and `-` but never ends with one.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([a-zA-Z][a-zA-Z0-9_.-]*[a-zA-Z0-9_]|[a-zA-Z])")
        .expect("placeholder pattern is valid")
});

/// A resolved `@name` occurrence in a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Name without the `@`.
    pub name: String,
    /// Byte offset of the `@`.
    pub start: usize,
    /// Byte offset one past the token.
    pub end: usize,
}

/// Find every `@name` token in `template`.
pub fn find_placeholders(template: &str) -> Vec<Placeholder> {
    let bytes = template.as_bytes();
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let name = cap.get(1)?;
            let start = whole.start();
            if start > 0 {
                let prev = bytes[start - 1];
                if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'`' {
                    return None;
                }
            }
            let line_start = template[..start].rfind('\n').map_or(0, |i| i + 1);
            let ticks = template[line_start..start].bytes().filter(|&b| b == b'`').count();
            if ticks % 2 != 0 {
                return None;
            }
            Some(Placeholder {
                name: name.as_str().to_string(),
                start,
                end: whole.end(),
            })
        })
        .collect()
}

/// Renders `@variable` and `@agent` placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderRenderer;

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, ctx: &RenderContext, template: &str) -> Result<RenderedTemplate> {
        let mut spans = Vec::new();
        let mut literal = String::new();
        let mut output = String::with_capacity(template.len());
        // (byte start, byte end, style) in the output
        let mut ranges: Vec<(usize, usize, &'static str)> = Vec::new();
        let mut cursor = 0;

        for token in find_placeholders(template) {
            let between = &template[cursor..token.start];
            literal.push_str(between);
            output.push_str(between);
            cursor = token.end;
            let raw = &template[token.start..token.end];

            let (replacement, style) = if let Some(value) = ctx.variable(&token.name) {
                (value, VARIABLE_STYLE)
            } else if ctx.has_agent(&token.name) {
                (raw, AGENT_STYLE)
            } else {
                literal.push_str(raw);
                output.push_str(raw);
                continue;
            };

            if !literal.is_empty() {
                spans.push(StyledSpan::new(std::mem::take(&mut literal), TEXT_STYLE));
            }
            spans.push(StyledSpan::new(raw, style));

            let start = output.len();
            output.push_str(replacement);
            if output.len() > start {
                ranges.push((start, output.len(), style));
            }
        }

        let rest = &template[cursor..];
        literal.push_str(rest);
        output.push_str(rest);
        if !literal.is_empty() {
            spans.push(StyledSpan::new(literal, TEXT_STYLE));
        }

        let annotations = ranges
            .into_iter()
            .map(|(start, end, style)| {
                let (start_line, start_col) = line_col(&output, start);
                let (end_line, end_col) = line_col(&output, end);
                PreviewAnnotation {
                    start_line,
                    start_col,
                    end_line,
                    end_col,
                    style: style.to_string(),
                }
            })
            .collect();

        Ok(RenderedTemplate {
            input_spans: spans,
            output: PreviewBuffer {
                text: output,
                annotations,
            },
        })
    }
}

/// 0-based line and byte column of `offset` in `text`.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count();
    let col = before.rfind('\n').map_or(offset, |i| offset - i - 1);
    (line, col)
}
