//! Logging system initialization
//!
//! Sets up `tracing` output according to `[logging]`: stderr or file,
//! optional daily rotation, text or JSON lines. Stdout is left to command
//! output.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{Result, UrlShrinkError};

const DEFAULT_LOG_NAME: &str = "urlshrink.log";

/// Where log lines go, derived from [`LoggingConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    File(String),
    Rolling(String),
}

impl LogTarget {
    pub fn from_config(config: &LoggingConfig) -> Self {
        match config.file.as_deref() {
            Some(file) if !file.is_empty() && config.enable_rotation => {
                LogTarget::Rolling(file.to_string())
            }
            Some(file) if !file.is_empty() => LogTarget::File(file.to_string()),
            _ => LogTarget::Console,
        }
    }
}

fn make_writer(
    target: &LogTarget,
    config: &LoggingConfig,
) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    match target {
        LogTarget::Console => Ok(Box::new(std::io::stderr())),
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Ok(Box::new(file))
        }
        LogTarget::Rolling(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(DEFAULT_LOG_NAME);
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir)
                .map_err(|e| {
                    UrlShrinkError::file_operation(format!(
                        "Failed to create rolling log appender: {}",
                        e
                    ))
                })?;
            Ok(Box::new(appender))
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// The returned guard must be kept alive for the lifetime of the program so
/// buffered lines are flushed. Calling this twice returns an error.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let target = LogTarget::from_config(config);
    let writer = make_writer(&target, config)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level).map_err(|e| {
        UrlShrinkError::invalid_argument(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(target == LogTarget::Console);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| {
        UrlShrinkError::invalid_argument(format!("Logging already initialized: {}", e))
    })?;

    Ok(guard)
}
