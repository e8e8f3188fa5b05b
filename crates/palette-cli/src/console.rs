//! Terminal implementations of the host seams.

use std::io::{BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use palette_backends::HostSelect;
use palette_core::{
    Notifier, NotifyLevel, PaletteActions, PaletteError, PromptConfig, RenderContext, Result,
    TemplateRenderer,
};
use palette_runtime::PlaceholderRenderer;
use parking_lot::Mutex;
use tracing::warn;

use crate::service::ServiceController;

// ─────────────────────────────────────────────────────────────────────────────
// Select
// ─────────────────────────────────────────────────────────────────────────────

/// One line of user input at the select prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// 0-based row position.
    Row(usize),
    /// Empty line or `q`.
    Dismiss,
    /// Anything else.
    Invalid,
}

/// Interpret one line of user input against `count` rows.
pub fn parse_choice(line: &str, count: usize) -> Choice {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("q") {
        return Choice::Dismiss;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Row(n - 1),
        _ => Choice::Invalid,
    }
}

/// Line input shared by the select prompt and [`ConsoleActions`].
///
/// One buffered reader serves both, so lines buffered while answering the
/// select are still there for the follow-up question.
pub type SharedInput<R> = Arc<Mutex<R>>;

/// Numbered-list select on a line-oriented terminal.
pub struct TerminalSelect<R, W> {
    input: SharedInput<R>,
    output: Mutex<W>,
}

impl<R, W> TerminalSelect<R, W> {
    /// Select reading answers from `input` and drawing to `output`.
    pub fn new(input: SharedInput<R>, output: W) -> Self {
        Self {
            input,
            output: Mutex::new(output),
        }
    }
}

impl<R, W> HostSelect for TerminalSelect<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn select(&self, prompt: &str, rows: &[String]) -> Result<Option<usize>> {
        let io = |e: std::io::Error| PaletteError::Backend(format!("terminal select: {e}"));
        let width = rows.len().to_string().len();

        let mut output = self.output.lock();
        for (i, row) in rows.iter().enumerate() {
            writeln!(output, "{:>width$}: {row}", i + 1).map_err(io)?;
        }

        let mut input = self.input.lock();
        loop {
            write!(output, "{prompt} [1-{}, q to cancel]: ", rows.len()).map_err(io)?;
            output.flush().map_err(io)?;

            let mut line = String::new();
            if input.read_line(&mut line).map_err(io)? == 0 {
                return Ok(None);
            }
            match parse_choice(&line, rows.len()) {
                Choice::Row(pos) => return Ok(Some(pos)),
                Choice::Dismiss => return Ok(None),
                Choice::Invalid => warn!(input = line.trim(), "not a row number"),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifier
// ─────────────────────────────────────────────────────────────────────────────

/// Prints notifications to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        let tag = match level {
            NotifyLevel::Info => "info",
            NotifyLevel::Warn => "warning",
            NotifyLevel::Error => "error",
        };
        eprintln!("palette: {tag}: {message}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Prints chosen prompts and commands, and drives the service backend.
pub struct ConsoleActions<R, W> {
    input: SharedInput<R>,
    output: Mutex<W>,
    renderer: PlaceholderRenderer,
    service: ServiceController,
}

impl<R, W> ConsoleActions<R, W> {
    /// Actions reading follow-up input from `input` and printing to `output`.
    pub fn new(input: SharedInput<R>, output: W, service: ServiceController) -> Self {
        Self {
            input,
            output: Mutex::new(output),
            renderer: PlaceholderRenderer,
            service,
        }
    }
}

impl<R, W: Write> ConsoleActions<R, W> {
    fn emit(&self, line: &str) -> Result<()> {
        let mut output = self.output.lock();
        writeln!(output, "{line}")
            .and_then(|()| output.flush())
            .map_err(|e| PaletteError::Action(format!("write failed: {e}")))
    }
}

#[async_trait]
impl<R, W> PaletteActions for ConsoleActions<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    async fn run_ask(&self, template: &str, _prompt: &PromptConfig, ctx: &RenderContext) -> Result<()> {
        let rendered = self.renderer.render(ctx, template)?.output.text;
        let mut line = String::new();
        let _ = self
            .input
            .lock()
            .read_line(&mut line)
            .map_err(|e| PaletteError::Action(format!("read failed: {e}")))?;
        self.emit(&format!("{rendered}{}", line.trim_end()))
    }

    async fn run_prompt(&self, template: &str, _prompt: &PromptConfig, ctx: &RenderContext) -> Result<()> {
        let rendered = self.renderer.render(ctx, template)?;
        self.emit(&rendered.output.text)
    }

    async fn run_named_command(&self, name: &str) -> Result<()> {
        self.emit(&format!("/{name}"))
    }

    async fn toggle_service(&self) -> Result<()> {
        self.service.toggle().await
    }

    async fn start_service(&self) -> Result<()> {
        self.service.start().await
    }

    async fn stop_service(&self) -> Result<()> {
        self.service.stop().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::{BufReader, Cursor};
    use std::path::PathBuf;

    use assert_matches::assert_matches;
    use palette_core::NoopHooks;

    use super::*;

    // ── parse_choice ────────────────────────────────────────────────

    #[test]
    fn choice_parsing() {
        assert_eq!(parse_choice("3\n", 5), Choice::Row(2));
        assert_eq!(parse_choice("", 5), Choice::Dismiss);
        assert_eq!(parse_choice(" Q ", 5), Choice::Dismiss);
        assert_eq!(parse_choice("0", 5), Choice::Invalid);
        assert_eq!(parse_choice("6", 5), Choice::Invalid);
        assert_eq!(parse_choice("two", 5), Choice::Invalid);
    }

    fn input<R>(reader: R) -> SharedInput<R> {
        Arc::new(Mutex::new(reader))
    }

    fn idle_service() -> ServiceController {
        ServiceController::new(None, PathBuf::from("/nonexistent/service.pid"))
    }

    // ── TerminalSelect ──────────────────────────────────────────────

    #[test]
    fn select_numbers_rows_and_retries() {
        let select = TerminalSelect::new(input(&b"nine\n2\n"[..]), Vec::new());
        let rows: Vec<String> = (0..10).map(|i| format!("row{i}")).collect();

        let choice = select.select("Palette", &rows).unwrap();
        assert_eq!(choice, Some(1));

        let printed = String::from_utf8(select.output.lock().clone()).unwrap();
        assert!(printed.starts_with(" 1: row0\n"));
        assert!(printed.contains("10: row9\n"));
        assert_eq!(printed.matches("Palette [1-10").count(), 2);
    }

    #[test]
    fn select_eof_dismisses() {
        let select = TerminalSelect::new(input(&b""[..]), Vec::new());
        assert_eq!(select.select("Palette", &["a".to_string()]).unwrap(), None);
    }

    // ── ConsoleActions ──────────────────────────────────────────────

    fn ctx() -> RenderContext {
        RenderContext::new(
            BTreeMap::from([("this".to_string(), "main.rs".to_string())]),
            Arc::new(NoopHooks),
        )
    }

    fn printed<R>(actions: &ConsoleActions<R, Vec<u8>>) -> String {
        String::from_utf8(actions.output.lock().clone()).unwrap()
    }

    #[tokio::test]
    async fn prompt_prints_rendered_text() {
        let actions = ConsoleActions::new(input(&b""[..]), Vec::new(), idle_service());
        actions
            .run_prompt("Explain @this", &PromptConfig::default(), &ctx())
            .await
            .unwrap();
        assert_eq!(printed(&actions), "Explain main.rs\n");
    }

    #[tokio::test]
    async fn ask_appends_follow_up_line() {
        let actions =
            ConsoleActions::new(input(&b"why is it slow?\n"[..]), Vec::new(), idle_service());
        actions
            .run_ask("@this: ", &PromptConfig::default(), &ctx())
            .await
            .unwrap();
        assert_eq!(printed(&actions), "main.rs: why is it slow?\n");
    }

    #[tokio::test]
    async fn command_prints_slash_name() {
        let actions = ConsoleActions::new(input(&b""[..]), Vec::new(), idle_service());
        actions.run_named_command("session.new").await.unwrap();
        assert_eq!(printed(&actions), "/session.new\n");
    }

    #[tokio::test]
    async fn service_actions_need_backend() {
        let actions = ConsoleActions::new(input(&b""[..]), Vec::new(), idle_service());
        assert_matches!(actions.start_service().await, Err(PaletteError::Action(_)));
    }

    #[tokio::test]
    async fn follow_up_reads_past_buffered_select_answer() {
        let stdin = input(BufReader::new(Cursor::new(b"2\nwhy is it slow?\n".to_vec())));
        let select = TerminalSelect::new(Arc::clone(&stdin), Vec::new());
        let actions = ConsoleActions::new(stdin, Vec::new(), idle_service());

        let rows = vec!["explain".to_string(), "ask".to_string()];
        assert_eq!(select.select("Palette", &rows).unwrap(), Some(1));

        actions
            .run_ask("@this: ", &PromptConfig::default(), &ctx())
            .await
            .unwrap();
        assert_eq!(printed(&actions), "main.rs: why is it slow?\n");
    }
}
