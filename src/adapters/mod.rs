//! External system integrations for Cookbook.
//!
//! - [`database`] - Document store abstraction (trait-based) and factory
//! - [`cosmosdb`] - Azure Cosmos DB store
//! - [`postgresql`] - PostgreSQL (JSONB) store
//! - [`auth`] - Authentication provider abstraction and Identity Toolkit client
//! - [`memory`] - In-process store and auth provider
//!
//! # Document stores
//!
//! The backend is chosen by `database_target`:
//!
//! ```rust,no_run
//! use cookbook::adapters::database::create_document_store;
//! use cookbook::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cookbook.toml")?;
//! let store = create_document_store(&config).await?;
//! store.ensure_storage_exists().await?;
//! println!("Using {}", store.backend());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cosmosdb;
pub mod database;
pub mod memory;
pub mod postgresql;
