//! Subscriber setup
//!
//! Cookbook events go to stderr in a compact format. With file logging
//! enabled they are also written as flattened JSON lines, one object per
//! event, so store and auth fields such as `operation`, `path` and `uid` are
//! top level keys in `cookbook.log`.

use crate::config::LoggingConfig;
use crate::domain::{CookbookError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix inside `logging.local_path`
pub const LOG_FILE_NAME: &str = "cookbook.log";

/// Storage and HTTP crates that log every request at debug level
const CHATTY_DEPENDENCIES: [&str; 6] = [
    "tokio_postgres",
    "deadpool_postgres",
    "azure_core",
    "azure_data_cosmos",
    "reqwest",
    "hyper",
];

/// Keeps the file writer flushing; drop it last
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` replaces the computed filter when set.
///
/// # Errors
///
/// [`CookbookError::Configuration`] for an unknown level or rotation, an
/// unwritable log directory, or when a subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
    };

    let console = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(level >= Level::DEBUG)
        .with_filter(filter());

    let (file, file_writer) = if config.local_enabled {
        let rotation = parse_rotation(&config.local_rotation)?;
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            CookbookError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let appender = RollingFileAppender::new(rotation, &config.local_path, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(writer)
            .with_filter(filter());
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| CookbookError::Configuration(format!("Logging is already initialized: {e}")))?;

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        directory = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

/// `cookbook` at `level`, dependencies capped at `warn` unless tracing
fn directives(level: Level) -> String {
    let dependency_level = if level == Level::TRACE {
        Level::TRACE
    } else {
        Level::WARN
    };

    std::iter::once(format!("cookbook={level}"))
        .chain(
            CHATTY_DEPENDENCIES
                .iter()
                .map(|krate| format!("{krate}={dependency_level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(CookbookError::Configuration(format!(
            "Invalid log level '{level}', expected trace, debug, info, warn or error"
        ))),
    }
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(CookbookError::Configuration(format!(
            "Invalid log rotation '{other}'"
        ))),
    }
}
