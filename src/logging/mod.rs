//! Structured logging for Mouse Manager
//!
//! Everything logs through `tracing`. `init` installs a subscriber with a
//! JSON file layer (daily files in the log directory) and, outside the TUI,
//! a compact stderr layer for warnings and errors.

mod reader;

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogSettings;
use crate::error::{MouseError, MouseResult};

pub use reader::{LogEntry, LogReader};

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "MOUSE_MANAGER_LOG";

/// Log files are named `<prefix>.<YYYY-MM-DD>.log`
pub const LOG_FILE_PREFIX: &str = "mouse_manager";

/// Keeps the background file writer alive; drop it to flush
pub struct LogGuard {
    _file: WorkerGuard,
}

/// Install the global subscriber
pub fn init(log_dir: &Path, settings: &LogSettings, console: bool) -> MouseResult<LogGuard> {
    fs::create_dir_all(log_dir).map_err(|e| {
        MouseError::Io(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| MouseError::Config(format!("Invalid log level '{}': {}", settings.level, e)))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(settings.max_files.max(1))
        .build(log_dir)
        .map_err(|e| MouseError::Config(format!("Failed to open log file: {}", e)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(writer);

    let console_layer = (console && settings.console).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| MouseError::Config(format!("Failed to initialise logging: {}", e)))?;

    Ok(LogGuard { _file: guard })
}
