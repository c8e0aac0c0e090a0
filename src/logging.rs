//! Tracing setup for the binary
//!
//! The library only emits events; installing a subscriber is left to the
//! binary (or to tests that want to see the output).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Environment variable that overrides the configured log filter
pub const LOG_ENV_VAR: &str = "TOURDESK_LOG";

/// Initializes the global tracing subscriber.
///
/// `TOURDESK_LOG` wins over `default_level` when set. Log lines go to stderr
/// so command output on stdout stays machine-readable.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another subscriber may already be installed by an embedding program.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
