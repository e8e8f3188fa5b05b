//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`PaletteSettings::default()`]
//! 2. If `~/.palette/settings.json` exists, deep-merge user values over defaults
//! 3. Deep-merge `PALETTE_*` environment overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::PaletteSettings;

/// Accepted range for `server.timeoutMs`.
pub const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=600_000;

/// Resolve the path to the settings file (`~/.palette/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".palette").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<PaletteSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON, a malformed `PALETTE_*`
/// value, or an out-of-range setting is an error.
pub fn load_settings_from_path(path: &Path) -> Result<PaletteSettings> {
    resolve(path, &|name| std::env::var(name).ok())
}

fn resolve(path: &Path, env: &dyn Fn(&str) -> Option<String>) -> Result<PaletteSettings> {
    let mut merged = serde_json::to_value(PaletteSettings::default())?;
    if path.exists() {
        debug!(?path, "loading settings from file");
        let user: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        merged = deep_merge(merged, user);
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let settings: PaletteSettings = serde_json::from_value(deep_merge(merged, env_layer(env)?))?;
    validate(&settings)?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

// ── Environment layer ───────────────────────────────────────────────────────

/// Build the `PALETTE_*` override object from `env`.
///
/// Unset and empty variables contribute nothing.
fn env_layer(env: &dyn Fn(&str) -> Option<String>) -> Result<Value> {
    let var = |name: &str| env(name).filter(|v| !v.is_empty());
    let invalid = |name: &str, val: &str| SettingsError::InvalidValue(format!("{name}={val}"));

    let mut layer = json!({});
    if let Some(url) = var("PALETTE_URL") {
        layer = deep_merge(layer, json!({"server": {"url": url}}));
    }
    if let Some(raw) = var("PALETTE_TIMEOUT_MS") {
        let ms: u64 = raw.parse().map_err(|_| invalid("PALETTE_TIMEOUT_MS", &raw))?;
        layer = deep_merge(layer, json!({"server": {"timeoutMs": ms}}));
    }
    if let Some(backend) = var("PALETTE_BACKEND") {
        layer = deep_merge(layer, json!({"select": {"backend": backend}}));
    }
    if let Some(level) = var("PALETTE_LOG_LEVEL") {
        layer = deep_merge(layer, json!({"logging": {"level": level}}));
    }
    if let Some(raw) = var("PALETTE_PROVIDER") {
        let on = parse_bool(&raw).ok_or_else(|| invalid("PALETTE_PROVIDER", &raw))?;
        layer = deep_merge(layer, json!({"select": {"sections": {"provider": on}}}));
    }
    Ok(layer)
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reject settings the palette cannot run with.
pub fn validate(settings: &PaletteSettings) -> Result<()> {
    let timeout = settings.server.timeout_ms;
    if !TIMEOUT_RANGE_MS.contains(&timeout) {
        return Err(SettingsError::InvalidValue(format!(
            "server.timeoutMs {timeout} outside {}..={}",
            TIMEOUT_RANGE_MS.start(),
            TIMEOUT_RANGE_MS.end()
        )));
    }
    if let Some(backend) = &settings.provider.backend
        && backend.command.trim().is_empty()
    {
        return Err(SettingsError::InvalidValue("provider.backend.command is empty".into()));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
