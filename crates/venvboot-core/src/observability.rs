//! Observability: tracing init.
//!
//! Uses config::ObservabilityConfig for VENVBOOT_QUIET, VENVBOOT_LOG_LEVEL and
//! VENVBOOT_LOG_JSON. `RUST_LOG` takes precedence when set.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive derived from config. Quiet mode drops everything below WARN.
pub fn filter_directive(cfg: &ObservabilityConfig) -> String {
    if cfg.quiet {
        "venvboot=warn".to_string()
    } else {
        cfg.log_level.clone()
    }
}

/// Initialize tracing. Call once at process startup; later calls are no-ops.
/// Logs are written to stderr so child tool output on stdout stays clean.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level = filter_directive(cfg);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()
    };
}
