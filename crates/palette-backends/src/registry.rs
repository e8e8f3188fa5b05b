//! Backend registry and selection.
//!
//! The native backend is always registered and always available. Optional
//! backends are registered by the host; asking for one that is missing or
//! not installed falls back to native with a single warning.

use std::sync::Arc;

use palette_core::{Notifier, NotifyLevel, PaletteError};
use tracing::{debug, warn};

use crate::backend::{BackendKind, PickerBackend};

/// Outcome of resolving a backend preference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Backend to use.
    pub kind: BackendKind,
    /// Name that was asked for but could not be honoured.
    pub fallback_from: Option<String>,
}

impl Resolution {
    fn native() -> Self {
        Self {
            kind: BackendKind::Native,
            fallback_from: None,
        }
    }
}

/// Resolve `preference` against the available backends.
///
/// Never fails: anything that is not both known and available resolves to
/// native with `fallback_from` set.
pub fn resolve_backend(preference: Option<&str>, available: &[BackendKind]) -> Resolution {
    let Some(name) = preference.map(str::trim).filter(|name| !name.is_empty()) else {
        return Resolution::native();
    };

    match name.parse::<BackendKind>() {
        Ok(BackendKind::Native) => Resolution::native(),
        Ok(kind) if available.contains(&kind) => Resolution {
            kind,
            fallback_from: None,
        },
        _ => Resolution {
            kind: BackendKind::Native,
            fallback_from: Some(name.to_string()),
        },
    }
}

/// Registered presentation backends.
pub struct BackendRegistry {
    native: Arc<dyn PickerBackend>,
    optional: Vec<Arc<dyn PickerBackend>>,
}

impl BackendRegistry {
    /// Create a registry around the host's native backend.
    pub fn new(native: Arc<dyn PickerBackend>) -> Self {
        Self {
            native,
            optional: Vec::new(),
        }
    }

    /// Register an optional backend, replacing any previous one of the same
    /// kind. Registering a native backend replaces the native slot.
    pub fn register(&mut self, backend: Arc<dyn PickerBackend>) {
        let kind = backend.kind();
        if kind == BackendKind::Native {
            self.native = backend;
            return;
        }
        self.optional.retain(|b| b.kind() != kind);
        self.optional.push(backend);
        debug!(backend = %kind, "backend registered");
    }

    /// Kinds that can run right now. Native is always first.
    pub fn available(&self) -> Vec<BackendKind> {
        let mut kinds = vec![BackendKind::Native];
        kinds.extend(
            self.optional
                .iter()
                .filter(|b| b.is_available())
                .map(|b| b.kind()),
        );
        kinds
    }

    /// Registered backend of `kind`, available or not.
    pub fn get(&self, kind: BackendKind) -> Option<Arc<dyn PickerBackend>> {
        if kind == BackendKind::Native {
            return Some(Arc::clone(&self.native));
        }
        self.optional.iter().find(|b| b.kind() == kind).cloned()
    }

    /// Pick the backend for `preference`, warning once on fallback.
    pub fn select(&self, preference: Option<&str>, notifier: &dyn Notifier) -> Arc<dyn PickerBackend> {
        let resolution = resolve_backend(preference, &self.available());

        if let Some(requested) = resolution.fallback_from {
            let reason = PaletteError::BackendUnavailable(requested.clone());
            warn!(requested = %requested, "picker backend unavailable, falling back to native");
            notifier.notify(NotifyLevel::Warn, &format!("{reason}, using native select"));
            return Arc::clone(&self.native);
        }

        self.get(resolution.kind)
            .unwrap_or_else(|| Arc::clone(&self.native))
    }
}

#[cfg(test)]
mod tests {
    use palette_core::logging::capture_logs;
    use palette_core::{Result, SelectableItem, Selection};
    use parking_lot::Mutex;
    use serde_json::Value;
    use tracing::Level;

    use super::*;

    struct FakeBackend {
        kind: BackendKind,
        available: bool,
    }

    impl PickerBackend for FakeBackend {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn pick(&self, _items: &[SelectableItem], _options: &Value) -> Result<Selection> {
            Ok(Selection::Cancelled)
        }
    }

    fn fake(kind: BackendKind, available: bool) -> Arc<dyn PickerBackend> {
        Arc::new(FakeBackend { kind, available })
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(NotifyLevel, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NotifyLevel, message: &str) {
            self.messages.lock().push((level, message.to_string()));
        }
    }

    // ── resolve_backend ─────────────────────────────────────────────

    #[test]
    fn no_preference_is_native() {
        assert_eq!(resolve_backend(None, &[BackendKind::Native]), Resolution::native());
        assert_eq!(resolve_backend(Some("  "), &[BackendKind::Native]), Resolution::native());
    }

    #[test]
    fn available_preference_is_honoured() {
        let available = [BackendKind::Native, BackendKind::Rich];
        let resolution = resolve_backend(Some("rich"), &available);
        assert_eq!(resolution.kind, BackendKind::Rich);
        assert_eq!(resolution.fallback_from, None);
    }

    #[test]
    fn unavailable_preference_falls_back() {
        let resolution = resolve_backend(Some("list"), &[BackendKind::Native]);
        assert_eq!(resolution.kind, BackendKind::Native);
        assert_eq!(resolution.fallback_from.as_deref(), Some("list"));
    }

    #[test]
    fn unknown_name_falls_back() {
        let resolution = resolve_backend(Some("telescope"), &[BackendKind::Native]);
        assert_eq!(resolution.kind, BackendKind::Native);
        assert_eq!(resolution.fallback_from.as_deref(), Some("telescope"));
    }

    // ── BackendRegistry ─────────────────────────────────────────────

    #[test]
    fn available_skips_uninstalled() {
        let mut registry = BackendRegistry::new(fake(BackendKind::Native, true));
        registry.register(fake(BackendKind::Rich, false));
        registry.register(fake(BackendKind::List, true));
        assert_eq!(registry.available(), vec![BackendKind::Native, BackendKind::List]);
        assert!(registry.get(BackendKind::Rich).is_some());
    }

    #[test]
    fn register_replaces_same_kind() {
        let mut registry = BackendRegistry::new(fake(BackendKind::Native, true));
        registry.register(fake(BackendKind::Rich, false));
        registry.register(fake(BackendKind::Rich, true));
        assert_eq!(registry.available(), vec![BackendKind::Native, BackendKind::Rich]);
    }

    #[test]
    fn select_available_backend_is_silent() {
        let (logs, _guard) = capture_logs();
        let mut registry = BackendRegistry::new(fake(BackendKind::Native, true));
        registry.register(fake(BackendKind::Rich, true));
        let notifier = RecordingNotifier::default();

        let backend = registry.select(Some("rich"), &notifier);
        assert_eq!(backend.kind(), BackendKind::Rich);
        assert!(notifier.messages.lock().is_empty());
        assert_eq!(logs.count_at_level(Level::WARN), 0);
    }

    #[test]
    fn select_unavailable_warns_exactly_once() {
        let (logs, _guard) = capture_logs();
        let mut registry = BackendRegistry::new(fake(BackendKind::Native, true));
        registry.register(fake(BackendKind::Rich, false));
        let notifier = RecordingNotifier::default();

        let backend = registry.select(Some("rich"), &notifier);
        assert_eq!(backend.kind(), BackendKind::Native);

        let messages = notifier.messages.lock();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, NotifyLevel::Warn);
        assert!(messages[0].1.contains("rich"));

        let warnings = logs.at_level(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field("requested"), Some("rich"));
    }
}
