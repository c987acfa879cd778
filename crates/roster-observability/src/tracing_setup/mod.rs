//! Subscriber installation and the span macros in [`spans`].

pub mod spans;

use std::sync::Once;

use roster_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Env var holding the filter directive, e.g. `ROSTER_LOG=roster_matching=debug`.
pub const LOG_ENV: &str = "ROSTER_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Install a global subscriber once per process. A subscriber installed by
/// someone else (a test harness, an embedding binary) is left in place.
fn install(filter: impl FnOnce() -> EnvFilter, json: bool) {
    INIT.call_once(|| {
        let fmt = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_target(true)
            .with_file(json)
            .with_line_number(json);
        let _ = if json { fmt.json().try_init() } else { fmt.try_init() };
    });
}

/// `ROSTER_LOG` when set, otherwise `fallback`.
fn env_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// JSON logs filtered by `ROSTER_LOG`, `info` when unset.
pub fn init_tracing() {
    install(|| env_or(DEFAULT_DIRECTIVE), true);
}

/// JSON logs filtered by an explicit directive; `ROSTER_LOG` is ignored.
pub fn init_tracing_with_filter(directive: &str) {
    install(|| EnvFilter::new(directive), true);
}

/// Logs per the `[observability]` config section. `ROSTER_LOG` still wins.
pub fn init_from_config(config: &ObservabilityConfig) {
    install(|| env_or(&config.log_level), config.json);
}
