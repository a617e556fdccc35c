//! Configuration management for Cookbook.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Cookbook uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `COOKBOOK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load, including production-only rules
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cookbook::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cookbook.toml")?;
//!
//! println!("Project: {}", config.platform.project_id);
//! println!("Store: {}", config.database_target.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PlatformConfig`] - Project identity, API key and identity endpoint
//! - [`MemoryConfig`] - Memory store snapshot file
//! - [`CosmosDbConfig`] - Cosmos DB connection
//! - [`PostgreSQLConfig`] - PostgreSQL connection pool
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//! database_target = "postgresql"
//! auth_target = "identity_toolkit"
//!
//! [platform]
//! api_key = "${COOKBOOK_API_KEY}"
//! project_id = "cookbook-dev"
//! auth_domain = "cookbook-dev.firebaseapp.com"
//! storage_bucket = "cookbook-dev.appspot.com"
//! messaging_sender_id = "1234"
//! app_id = "1:1234:web:abcd"
//!
//! [postgresql]
//! connection_string = "${COOKBOOK_PG_URL}"
//! ssl_mode = "require"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, AuthTarget, CookbookConfig, CosmosDbConfig, DatabaseTarget, Environment,
    LoggingConfig, MemoryConfig, PlatformConfig, PostgreSQLConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
