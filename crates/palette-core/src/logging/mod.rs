//! Structured logging with `tracing`.
//!
//! - [`init_subscriber`] installs the stderr `fmt` subscriber for binaries
//! - [`test_utils::capture_logs`] captures events in memory for assertions
//!
//! Library code only emits events; it never installs a subscriber.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Environment variable consulted before the configured level.
pub const LOG_ENV_VAR: &str = "PALETTE_LOG";

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at application startup. Subsequent calls are no-ops.
/// `PALETTE_LOG` (then `RUST_LOG`) takes precedence over `level`.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails only when a global subscriber is already set
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_subscriber_does_not_panic() {
        init_subscriber("warn");
        init_subscriber("debug");
    }
}
