//! Logging configuration using the tracing ecosystem.
//!
//! Output goes to a daily rotated file so it never draws over the form.
//! The level is taken from `RUST_LOG`, e.g. `RUST_LOG=tagfield=trace` to see
//! every menu update.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "tagfield=info,warn";

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "tagfield.log";

/// Initialize the logging system.
///
/// Logs are written to `log_dir`, or to the platform local data directory
/// (`~/.local/share/tagfield/logs/` on Linux) when none is given.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tagfield starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(log_dir)
}

/// Get the default log directory path.
fn default_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("tagfield").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("tagfield shutting down");
}
