//! # palette
//!
//! Terminal front end: loads settings, connects to the agent service, shows
//! the palette as a numbered list, and prints or runs the chosen entry.

#![deny(unsafe_code)]

mod console;
mod service;

use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use palette_backends::{BackendRegistry, NativeBackend};
use palette_client::HttpServiceClient;
use palette_core::logging::init_subscriber;
use palette_runtime::Palette;
use palette_settings::{PaletteSettings, load_settings_from_path, settings_path};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::console::{ConsoleActions, StderrNotifier, TerminalSelect};
use crate::service::ServiceController;

/// Unified prompt, command, and service picker.
#[derive(Parser, Debug)]
#[command(name = "palette", about = "Pick a prompt, command, or service action")]
struct Cli {
    /// Settings file (defaults to `~/.palette/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Agent service URL (overrides settings).
    #[arg(long)]
    url: Option<String>,

    /// Preferred picker backend (`native`, `rich`, `list`).
    #[arg(long)]
    backend: Option<String>,

    /// Hide the prompt section.
    #[arg(long)]
    no_prompts: bool,

    /// Hide the command section.
    #[arg(long)]
    no_commands: bool,

    /// Hide the service section.
    #[arg(long)]
    no_provider: bool,

    /// Log level for stderr output (overrides settings).
    #[arg(long)]
    log_level: Option<String>,

    /// Template variable, repeatable (`--var this=src/main.rs:12`).
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,
}

impl Cli {
    /// Per-invocation selection overrides from the flags.
    fn overrides(&self) -> Value {
        let mut overrides = serde_json::Map::new();
        let mut sections = serde_json::Map::new();
        for (flag, key) in [
            (self.no_prompts, "prompts"),
            (self.no_commands, "commands"),
            (self.no_provider, "provider"),
        ] {
            if flag {
                let _ = sections.insert(key.to_string(), json!(false));
            }
        }
        if !sections.is_empty() {
            let _ = overrides.insert("sections".to_string(), Value::Object(sections));
        }
        if let Some(backend) = &self.backend {
            let _ = overrides.insert("backend".to_string(), json!(backend));
        }
        if overrides.is_empty() {
            Value::Null
        } else {
            Value::Object(overrides)
        }
    }

    fn settings_file(&self) -> PathBuf {
        self.settings.clone().unwrap_or_else(settings_path)
    }

    /// Pid file of the service backend, next to the settings file.
    fn pid_file(&self) -> PathBuf {
        self.settings_file().with_file_name("service.pid")
    }

    fn variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        if let Ok(cwd) = std::env::current_dir() {
            let _ = vars.insert("cwd".to_string(), cwd.display().to_string());
        }
        vars.extend(self.vars.iter().cloned());
        vars
    }
}

fn parse_var(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

fn load(args: &Cli) -> Result<PaletteSettings> {
    let path = args.settings_file();
    if args.settings.is_some() && !path.exists() {
        bail!("settings file not found: {}", path.display());
    }
    let mut settings = load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    if let Some(url) = &args.url {
        settings.server.url.clone_from(url);
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let settings = load(&args)?;

    init_subscriber(args.log_level.as_deref().unwrap_or(&settings.logging.level));
    tracing::debug!(url = %settings.server.url, "palette starting");

    let client = Arc::new(HttpServiceClient::from_settings(&settings.server));
    // One buffer for stdin, so piped follow-up lines survive the select.
    let stdin = Arc::new(Mutex::new(BufReader::new(std::io::stdin())));
    let host = Arc::new(TerminalSelect::new(Arc::clone(&stdin), std::io::stderr()));
    let actions = Arc::new(ConsoleActions::new(
        stdin,
        std::io::stdout(),
        ServiceController::new(settings.provider.backend.clone(), args.pid_file()),
    ));
    // Only the native select exists in a plain terminal.
    let registry = BackendRegistry::new(Arc::new(NativeBackend::new(host)));

    let overrides = args.overrides();
    let palette = Palette::new(settings, client, actions, Arc::new(StderrNotifier), registry)
        .with_variables(args.variables());

    palette.open(overrides).await.context("Palette failed")?;
    Ok(())
}
