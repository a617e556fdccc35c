//! Document store factory
//!
//! Builds the backend selected by `database_target`.

use crate::adapters::cosmosdb::adapter::CosmosDbStore;
use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::database::traits::DocumentStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{CookbookConfig, DatabaseTarget};
use crate::domain::{CookbookError, Result};
use std::sync::Arc;

/// Create a document store based on the configuration
///
/// # Errors
///
/// Returns an error if the selected backend section is missing or the
/// client cannot be created
pub async fn create_document_store(
    config: &CookbookConfig,
) -> Result<Arc<dyn DocumentStore + Send + Sync>> {
    match config.database_target {
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory document store");
            let store = match &config.memory.snapshot_path {
                Some(path) => MemoryStore::with_snapshot(path).await?,
                None => MemoryStore::new(),
            };

            Ok(Arc::new(store) as Arc<dyn DocumentStore + Send + Sync>)
        }
        DatabaseTarget::CosmosDB => {
            let cosmos_config = config.cosmosdb.as_ref().ok_or_else(|| {
                CookbookError::Configuration(
                    "cosmosdb configuration is required when database_target = 'cosmosdb'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating CosmosDB document store");
            let client = CosmosDbClient::new(cosmos_config.clone()).await?;

            Ok(Arc::new(CosmosDbStore::new(client)) as Arc<dyn DocumentStore + Send + Sync>)
        }
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                CookbookError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL document store");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;

            Ok(Arc::new(PostgreSQLStore::new(client)) as Arc<dyn DocumentStore + Send + Sync>)
        }
    }
}
