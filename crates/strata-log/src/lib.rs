//! Structured logging for the strata simulation.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file in debug builds. The filter comes from `RUST_LOG` when set,
//! otherwise from the config's `debug.log_level`.

use std::path::{Path, PathBuf};

use strata_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written inside the log directory.
pub const LOG_FILE: &str = "strata.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables file logging when `config.debug.log_to_file` allows it
/// * `config` - source of the default filter directive
///
/// Returns the path of the JSON log file if one was opened. Calling this
/// twice in one process panics inside `tracing-subscriber`; call it once
/// from `main`.
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let filter_str = filter_directive(config);

    // RUST_LOG wins over the config.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file_allowed = config.is_none_or(|c| c.debug.log_to_file);
    if debug_build
        && file_allowed
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return Some(log_dir.join(LOG_FILE));
    }

    subscriber.init();
    None
}

/// The filter directive `init_logging` falls back to when `RUST_LOG` is unset.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
