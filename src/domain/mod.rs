//! Domain models and types for Cookbook.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecipeId`], [`IngredientId`], [`UserId`])
//! - **Entities** ([`Recipe`], [`RecipePart`], [`Ingredient`], [`User`])
//! - **Units of measure** ([`Unit`])
//! - **Document addressing** ([`DocumentPath`], [`CollectionPath`])
//! - **Error types** ([`CookbookError`], [`StoreError`], [`AuthError`])
//! - **Result type alias** ([`Result`])
//!
//! Entities are plain records. Their serde shape is the stored document shape
//! (camelCase field names), and decoding doubles as schema validation: a
//! blank identifier or a negative quantity fails to decode.
//!
//! ```rust
//! use cookbook::domain::{Recipe, RecipeId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recipe = Recipe::builder()
//!     .id(RecipeId::new("r1")?)
//!     .title("Tarte")
//!     .author("Bob")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod ingredient;
pub mod path;
pub mod recipe;
pub mod result;
pub mod unit;
pub mod user;

// Re-export commonly used types for convenience
pub use errors::{AuthError, CookbookError, StoreError};
pub use ids::{IngredientId, RecipeId, UserId};
pub use ingredient::Ingredient;
pub use path::{CollectionPath, DocumentPath};
pub use recipe::{Quantity, Recipe, RecipeBuilder, RecipePart};
pub use result::Result;
pub use unit::{Unit, UnitKind};
pub use user::User;
