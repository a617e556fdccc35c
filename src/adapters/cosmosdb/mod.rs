//! Azure Cosmos DB integration
//!
//! One container holds every collection; items are partitioned by their
//! collection path and queries are translated to Cosmos SQL.

pub mod adapter;
pub mod client;
pub mod models;
pub mod query;

pub use adapter::CosmosDbStore;
pub use client::CosmosDbClient;
pub use models::CosmosItem;
