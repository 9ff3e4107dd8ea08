//! Sets up the global `tracing` subscriber for the command line tools.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// The filter used for stderr when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log to stderr, and at the debug level to `debug_log_path` if given.
///
/// Stdout is left alone so command output can be piped. The stderr level is
/// read from `RUST_LOG` and falls back to [DEFAULT_LOG_FILTER].
///
/// # Errors
/// Returns an error if the debug log file cannot be opened for appending.
///
/// # Panics
/// Panics if a global subscriber has already been set.
pub fn setup_logging(debug_log_path: Option<&Path>) -> std::io::Result<()> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let debug_log = match debug_log_path {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}
