//! CLI command implementations
//!
//! Every command returns a process exit code:
//! 0 success, 2 configuration error, 3 invalid input or not found,
//! 4 connection error, 5 fatal error.

pub mod account;
pub mod ingredient;
pub mod init;
pub mod recipe;
pub mod status;
pub mod user;
pub mod validate;

use crate::config::load_config;
use crate::core::connection::Connections;
use crate::domain::{AuthError, CookbookError, StoreError};
use crate::log_error_with_context;
use crate::services::Services;

/// Exit code reported for a failed command
pub fn exit_code(error: &CookbookError) -> i32 {
    match error {
        CookbookError::Configuration(_) => 2,
        CookbookError::InvalidArgument(_) | CookbookError::Validation(_) => 3,
        CookbookError::Auth(AuthError::ConnectionFailed(_)) => 4,
        CookbookError::Auth(AuthError::InvalidResponse(_)) => 5,
        CookbookError::Auth(_) => 3,
        CookbookError::Store(
            StoreError::ConnectionFailed(_) | StoreError::Timeout(_) | StoreError::Throttled(_),
        ) => 4,
        _ => 5,
    }
}

/// Prints `error` under `context` and returns its exit code
pub(crate) fn report(context: &str, error: &CookbookError) -> i32 {
    log_error_with_context!(error, context);
    println!("❌ {context}");
    println!("   Error: {error}");
    exit_code(error)
}

/// Loads the configuration and builds the services
///
/// On failure the error is reported and its exit code returned.
pub(crate) async fn connect(config_path: &str) -> Result<Services, i32> {
    let config = load_config(config_path)
        .map_err(|e| report("Failed to load configuration file", &e))?;
    let connections = Connections::new(config);
    Services::new(&connections)
        .await
        .map_err(|e| report("Failed to connect", &e))
}
