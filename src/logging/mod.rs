//! Logging and observability
//!
//! Structured logging through `tracing`: a compact console layer, an
//! optional rotated JSON file layer, and macros for store calls and
//! authentication events.
//!
//! # Example
//!
//! ```no_run
//! use cookbook::logging::init_logging;
//! use cookbook::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log a document store call
///
/// # Example
///
/// ```no_run
/// use cookbook::log_store_call;
///
/// log_store_call!("get", "RECIPES/r1");
/// log_store_call!("query", "RECIPES", 3);
/// ```
#[macro_export]
macro_rules! log_store_call {
    ($operation:expr, $path:expr) => {
        tracing::debug!(
            operation = $operation,
            path = %$path,
            "Document store call"
        );
    };
    ($operation:expr, $path:expr, $count:expr) => {
        tracing::debug!(
            operation = $operation,
            path = %$path,
            count = $count,
            "Document store call"
        );
    };
}

/// Log an authentication event
///
/// # Example
///
/// ```no_run
/// use cookbook::log_auth_event;
///
/// log_auth_event!("sign_in", "uid-123");
/// ```
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $uid:expr) => {
        tracing::info!(
            event = $event,
            uid = %$uid,
            "Authentication event"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cookbook::log_error_with_context;
/// use cookbook::domain::CookbookError;
///
/// let error = CookbookError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
