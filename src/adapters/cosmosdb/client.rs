//! Cosmos DB client implementation
//!
//! Wraps the Azure SDK client and the single documents container.

use super::models::{CosmosItem, CosmosRow, PARTITION_KEY_PATH};
use crate::config::CosmosDbConfig;
use crate::domain::{CookbookError, Result, StoreError};
use azure_core::credentials::Secret;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::{ContainerProperties, IndexingPolicy, PartitionKeyDefinition};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, PartitionKey};
use futures::stream::StreamExt;
use std::borrow::Cow;
use std::time::Duration;

fn is_not_found(message: &str) -> bool {
    message.contains("404") || message.contains("NotFound")
}

/// Classifies an SDK error message, keeping throttling and timeouts apart
fn classify(message: String, fallback: fn(String) -> StoreError) -> StoreError {
    if message.contains("429") || message.contains("TooManyRequests") {
        StoreError::Throttled(message)
    } else if message.contains("408") || message.to_lowercase().contains("timed out") {
        StoreError::Timeout(message)
    } else {
        fallback(message)
    }
}

/// Cosmos DB client for Cookbook
pub struct CosmosDbClient {
    client: CosmosClient,
    database: DatabaseClient,
    container: ContainerClient,
    config: CosmosDbConfig,
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK client cannot be created.
    pub async fn new(config: CosmosDbConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key = Secret::new(config.key.expose_secret().as_str().to_string());
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(&config.endpoint, key, options).map_err(|e| {
            StoreError::ConnectionFailed(format!("Failed to create Cosmos client: {e}"))
        })?;

        let database = client.database_client(&config.database_name);
        let container = database.container_client(&config.container);

        Ok(Self {
            client,
            database,
            container,
            config,
        })
    }

    pub fn container_name(&self) -> &str {
        &self.config.container
    }

    /// Upper bound applied to every request
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_seconds)
    }

    async fn with_timeout<T>(
        &self,
        operation: &str,
        future: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.timeout(), future)
            .await
            .map_err(|_| {
                CookbookError::Store(StoreError::Timeout(format!(
                    "{operation} exceeded {}s",
                    self.config.request_timeout_seconds
                )))
            })?
    }

    /// Attempts to read the database to verify connectivity
    pub async fn test_connection(&self) -> Result<()> {
        self.with_timeout("Connection test", async {
            self.database.read(None).await.map_err(|e| {
                StoreError::ConnectionFailed(format!("Connection test failed: {e}"))
            })?;
            Ok(())
        })
        .await
    }

    /// Ensure the database and the documents container exist
    ///
    /// # Errors
    ///
    /// Returns an error if either cannot be created.
    pub async fn ensure_storage_exists(&self) -> Result<()> {
        if self.database.read(None).await.is_err() {
            tracing::info!(database = %self.config.database_name, "Creating database");
            self.client
                .create_database(&self.config.database_name, None)
                .await
                .map_err(|e| {
                    StoreError::SetupFailed(format!("Failed to create database: {e}"))
                })?;
        }

        match self.container.read(None).await {
            Ok(_) => {
                tracing::debug!(container = %self.config.container, "Container already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(container = %self.config.container, "Creating container");

                let properties = ContainerProperties {
                    id: Cow::Owned(self.config.container.clone()),
                    partition_key: PartitionKeyDefinition {
                        paths: vec![PARTITION_KEY_PATH.to_string()],
                        kind: azure_data_cosmos::models::PartitionKeyKind::Hash,
                        version: None,
                    },
                    indexing_policy: Some(IndexingPolicy::default()),
                    ..Default::default()
                };

                self.database
                    .create_container(properties, None)
                    .await
                    .map_err(|e| {
                        StoreError::SetupFailed(format!(
                            "Failed to create container {}: {e}",
                            self.config.container
                        ))
                    })?;

                tracing::info!(container = %self.config.container, "Container created successfully");
                Ok(())
            }
        }
    }

    /// Reads one item, `None` on 404
    pub async fn read_item(&self, collection: &str, id: &str) -> Result<Option<CosmosItem>> {
        self.with_timeout("Read", async {
            let partition_key = PartitionKey::from(collection.to_string());
            match self
                .container
                .read_item::<CosmosItem>(partition_key, id, None)
                .await
            {
                Ok(response) => {
                    let item = response.into_body().map_err(|e| {
                        StoreError::ReadFailed(format!("Failed to deserialize item {id}: {e}"))
                    })?;
                    Ok(Some(item))
                }
                Err(e) if is_not_found(&e.to_string()) => Ok(None),
                Err(e) => Err(classify(
                    format!("Failed to read {collection}/{id}: {e}"),
                    StoreError::ReadFailed,
                )
                .into()),
            }
        })
        .await
    }

    pub async fn upsert_item(&self, item: &CosmosItem) -> Result<()> {
        self.with_timeout("Upsert", async {
            let partition_key = PartitionKey::from(item.collection.clone());
            self.container
                .upsert_item(partition_key, item, None)
                .await
                .map_err(|e| {
                    classify(
                        format!("Failed to upsert {}/{}: {e}", item.collection, item.id),
                        StoreError::WriteFailed,
                    )
                })?;
            Ok(())
        })
        .await
    }

    /// Deletes one item; a missing item is not an error
    pub async fn delete_item(&self, collection: &str, id: &str) -> Result<()> {
        self.with_timeout("Delete", async {
            let partition_key = PartitionKey::from(collection.to_string());
            match self.container.delete_item(partition_key, id, None).await {
                Ok(_) => Ok(()),
                Err(e) if is_not_found(&e.to_string()) => Ok(()),
                Err(e) => Err(classify(
                    format!("Failed to delete {collection}/{id}: {e}"),
                    StoreError::DeleteFailed,
                )
                .into()),
            }
        })
        .await
    }

    /// Runs `sql` within the `collection` partition and collects every page
    pub async fn query_rows(&self, collection: &str, sql: String) -> Result<Vec<CosmosRow>> {
        self.with_timeout("Query", async {
            let partition_key = PartitionKey::from(collection.to_string());
            let mut stream = self
                .container
                .query_items::<CosmosRow>(sql, partition_key, None)
                .map_err(|e| StoreError::QueryFailed(format!("Failed to create query: {e}")))?;

            let mut rows = Vec::new();
            while let Some(item) = stream.next().await {
                let row = item.map_err(|e| {
                    classify(format!("Query on {collection} failed: {e}"), StoreError::QueryFailed)
                })?;
                rows.push(row);
            }
            Ok(rows)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(is_not_found("HTTP 404 Not Found"));
        assert!(is_not_found("ErrorKind::NotFound"));
        assert!(!is_not_found("HTTP 500"));
    }

    #[test]
    fn test_classify() {
        assert!(matches!(
            classify("status 429".to_string(), StoreError::ReadFailed),
            StoreError::Throttled(_)
        ));
        assert!(matches!(
            classify("request timed out".to_string(), StoreError::ReadFailed),
            StoreError::Timeout(_)
        ));
        assert!(matches!(
            classify("boom".to_string(), StoreError::WriteFailed),
            StoreError::WriteFailed(_)
        ));
    }
}
