//! Cosmos DB document store
//!
//! Implements [`DocumentStore`] over [`CosmosDbClient`]. Documents of every
//! collection share one container, partitioned by collection path.

use super::client::CosmosDbClient;
use super::models::CosmosItem;
use super::query::build_sql;
use crate::adapters::database::traits::{ensure_object, DocumentSnapshot, DocumentStore};
use crate::core::query::Query;
use crate::domain::{DocumentPath, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Cosmos DB implementation of [`DocumentStore`]
pub struct CosmosDbStore {
    client: Arc<CosmosDbClient>,
}

impl CosmosDbStore {
    pub fn new(client: CosmosDbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl DocumentStore for CosmosDbStore {
    fn backend(&self) -> &'static str {
        "cosmosdb"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_storage_exists(&self) -> Result<()> {
        self.client.ensure_storage_exists().await
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>> {
        let item = self
            .client
            .read_item(&path.collection().to_string(), path.id())
            .await?;
        Ok(item.map(|item| item.data))
    }

    async fn set(&self, path: &DocumentPath, data: Value) -> Result<()> {
        ensure_object(path, &data)?;
        let item = CosmosItem::new(path.collection().to_string(), path.id(), data);
        self.client.upsert_item(&item).await
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        self.client
            .delete_item(&path.collection().to_string(), path.id())
            .await
    }

    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>> {
        let collection = query.collection_path();
        let sql = build_sql(query)?;
        tracing::debug!(
            container = %self.client.container_name(),
            sql = %sql,
            "Running Cosmos DB query"
        );

        self.client
            .query_rows(&collection.to_string(), sql)
            .await?
            .into_iter()
            .map(|row| Ok(DocumentSnapshot::new(collection.doc(&row.id)?, row.data)))
            .collect()
    }
}
