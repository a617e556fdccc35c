//! Validate config command implementation

use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use crate::adapters::postgresql::client::redact;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Loads and validates the configuration, printing a summary
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Project: {}", config.platform.project_id);
        println!("  Auth Target: {}", config.auth_target.as_str());
        println!("  Identity Endpoint: {}", config.platform.identity_endpoint);

        match config.database_target {
            DatabaseTarget::Memory => {
                println!("  Database Target: memory");
                match &config.memory.snapshot_path {
                    Some(path) => println!("  Snapshot: {path}"),
                    None => println!("  Snapshot: none (data is lost on exit)"),
                }
            }
            DatabaseTarget::CosmosDB => {
                if let Some(ref cosmos_config) = config.cosmosdb {
                    println!("  Database Target: CosmosDB");
                    println!("  Cosmos DB Endpoint: {}", cosmos_config.endpoint);
                    println!("  Cosmos DB Database: {}", cosmos_config.database_name);
                    println!("  Cosmos DB Container: {}", cosmos_config.container);
                }
            }
            DatabaseTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!("  Database Target: PostgreSQL");
                    println!(
                        "  PostgreSQL Connection: {}",
                        redact(pg_config.connection_string.expose_secret().as_str())
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                    println!("  SSL Mode: {}", pg_config.ssl_mode);
                }
            }
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let code = ValidateArgs {}
            .execute("/nonexistent/cookbook.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookbook.toml");
        std::fs::write(
            &path,
            r#"
database_target = "memory"

[platform]
api_key = "AIza-test"
project_id = "cookbook-dev"
app_id = "1:123:web:abc"
"#,
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
