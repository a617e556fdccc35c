//! Cosmos DB document models
//!
//! Every collection shares one container. An item wraps the stored document
//! with its collection path, which is also the partition key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Partition key path of the documents container
pub const PARTITION_KEY_PATH: &str = "/collection";

/// Item as stored in the documents container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmosItem {
    /// Document id (last path segment)
    pub id: String,

    /// Collection path, e.g. `RECIPES` or `RECIPES/r1/NOTES`
    pub collection: String,

    /// The stored document
    pub data: Value,

    pub updated_at: DateTime<Utc>,
}

impl CosmosItem {
    pub fn new(collection: impl Into<String>, id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            data,
            updated_at: Utc::now(),
        }
    }
}

/// Projection returned by translated queries
#[derive(Debug, Clone, Deserialize)]
pub struct CosmosRow {
    pub id: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_shape() {
        let item = CosmosItem::new("RECIPES", "r1", json!({"title": "Tarte"}));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "r1");
        assert_eq!(value["collection"], "RECIPES");
        assert_eq!(value["data"]["title"], "Tarte");
        assert!(value["updatedAt"].is_string());
    }
}
