//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CookbookConfig;
use super::secret::secret_string;
use crate::domain::errors::CookbookError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CookbookConfig
/// 4. Applies environment variable overrides (COOKBOOK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CookbookError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cookbook::config::loader::load_config;
///
/// let config = load_config("cookbook.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CookbookConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CookbookError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CookbookError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text, with the same substitution,
/// override and validation steps as [`load_config`]
pub fn load_config_str(contents: &str) -> Result<CookbookConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CookbookConfig = toml::from_str(&contents)
        .map_err(|e| CookbookError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CookbookError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CookbookError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CookbookError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `name` and parses it, reporting unparsable values as configuration errors
fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(val) => val.parse().map(Some).map_err(|e| {
            CookbookError::Configuration(format!("Invalid value '{val}' for {name}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using the COOKBOOK_* prefix
///
/// Environment variables follow the pattern: COOKBOOK_<SECTION>_<KEY>
/// For example: COOKBOOK_PLATFORM_API_KEY, COOKBOOK_POSTGRESQL_SSL_MODE
fn apply_env_overrides(config: &mut CookbookConfig) -> Result<()> {
    if let Some(val) = env_parse("COOKBOOK_DATABASE_TARGET")? {
        config.database_target = val;
    }
    if let Some(val) = env_parse("COOKBOOK_AUTH_TARGET")? {
        config.auth_target = val;
    }

    // Application overrides
    if let Ok(val) = std::env::var("COOKBOOK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Platform overrides
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_API_KEY") {
        config.platform.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_PROJECT_ID") {
        config.platform.project_id = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_AUTH_DOMAIN") {
        config.platform.auth_domain = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_STORAGE_BUCKET") {
        config.platform.storage_bucket = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_APP_ID") {
        config.platform.app_id = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_PLATFORM_IDENTITY_ENDPOINT") {
        config.platform.identity_endpoint = val;
    }
    if let Some(val) = env_parse("COOKBOOK_PLATFORM_REQUEST_TIMEOUT_SECONDS")? {
        config.platform.request_timeout_seconds = val;
    }

    // Memory store overrides
    if let Ok(val) = std::env::var("COOKBOOK_MEMORY_SNAPSHOT_PATH") {
        config.memory.snapshot_path = Some(val);
    }

    // Cosmos DB overrides (only if CosmosDB is configured)
    if let Some(ref mut cosmos_config) = config.cosmosdb {
        if let Ok(val) = std::env::var("COOKBOOK_COSMOSDB_ENDPOINT") {
            cosmos_config.endpoint = val;
        }
        if let Ok(val) = std::env::var("COOKBOOK_COSMOSDB_KEY") {
            cosmos_config.key = secret_string(val);
        }
        if let Ok(val) = std::env::var("COOKBOOK_COSMOSDB_DATABASE_NAME") {
            cosmos_config.database_name = val;
        }
        if let Ok(val) = std::env::var("COOKBOOK_COSMOSDB_CONTAINER") {
            cosmos_config.container = val;
        }
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("COOKBOOK_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Some(val) = env_parse("COOKBOOK_POSTGRESQL_MAX_CONNECTIONS")? {
            pg_config.max_connections = val;
        }
        if let Ok(val) = std::env::var("COOKBOOK_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    // Logging overrides
    if let Some(val) = env_parse("COOKBOOK_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("COOKBOOK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
