// Cookbook - Recipe collection backend
// Copyright (c) 2025 Cookbook Contributors
// Licensed under the MIT License

//! # Cookbook - recipe collection backend
//!
//! Cookbook lets users register, authenticate and manage a personal
//! collection of recipes stored in a document database.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`services`] - Recipe, ingredient, user and account services
//! - [`core`] - Connections, typed document access and query building
//! - [`adapters`] - Store and auth backends (Cosmos DB, PostgreSQL,
//!   Identity Toolkit, in-memory)
//! - [`domain`] - Domain types, paths and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cookbook::config::load_config;
//! use cookbook::core::connection::Connections;
//! use cookbook::domain::Recipe;
//! use cookbook::services::Services;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connections = Connections::new(load_config("cookbook.toml")?);
//!     let services = Services::new(&connections).await?;
//!
//!     let recipe = Recipe::builder().title("Tarte Tatin").author("Alice").build()?;
//!     let created = services.recipes.create(recipe).await?;
//!
//!     for recipe in services.recipes.get_by_author("Alice").await? {
//!         println!("{} ({:?})", recipe.title, recipe.id);
//!     }
//!     services.recipes.delete(created.id.as_ref().map_or("", |id| id.as_str())).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Documents and queries
//!
//! Documents are addressed by slash-separated paths and read through
//! [`core::access::DocumentAccess`]. Filters and ordering are folded into a
//! [`core::query::Query`], which every backend translates or evaluates:
//!
//! ```rust
//! use cookbook::core::query::{build_query, Filter, FilterOp, OrderBy};
//! use cookbook::domain::CollectionPath;
//!
//! let recipes = CollectionPath::parse("RECIPES").unwrap();
//! let query = build_query(
//!     &recipes,
//!     &[Filter::eq("author", "Alice"), Filter::new("tags", FilterOp::ArrayContains, "dessert")],
//!     Some(&OrderBy::from("title")),
//! )
//! .unwrap();
//! assert_eq!(query.clauses().len(), 3);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::CookbookError`]. Single
//! document lookups report a missing document as `Ok(None)`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod services;
