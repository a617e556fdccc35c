//! Core document access for Cookbook.
//!
//! # Modules
//!
//! - [`connection`] - Memoized application, store and auth handles
//! - [`access`] - Typed CRUD over document paths
//! - [`query`] - Filter/ordering composition and in-process evaluation
//!
//! # Example
//!
//! ```rust,no_run
//! use cookbook::config::load_config;
//! use cookbook::core::connection::Connections;
//! use cookbook::core::query::{Filter, OrderBy};
//! use cookbook::domain::Recipe;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connections = Connections::new(load_config("cookbook.toml")?);
//! let documents = connections.documents().await?;
//!
//! let recipes: Vec<Recipe> = documents
//!     .get_documents_where("RECIPES", &[Filter::eq("author", "Alice")], Some(&OrderBy::from("title")))
//!     .await?;
//! println!("{} recipes", recipes.len());
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod connection;
pub mod query;

pub use access::DocumentAccess;
pub use connection::{AppHandle, Connections};
