//! Recipe domain model
//!
//! Recipes embed their parts as an ordered array; the author's display name
//! is denormalized onto each recipe and is not kept in sync with later
//! profile renames.

use super::ids::{IngredientId, RecipeId};
use super::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative, finite ingredient quantity
///
/// Decoding a stored document with a negative quantity fails.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    /// Creates a quantity, rejecting negative and non-finite values
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("Quantity must be a finite number, got {value}"));
        }
        if value < 0.0 {
            return Err(format!("Quantity must be >= 0, got {value}"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Quantity {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ingredient-quantity-unit line within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePart {
    /// Catalog ingredient this part refers to
    pub ingredient_id: IngredientId,

    /// Ingredient name, copied from the catalog
    pub name: String,

    pub quantity: Quantity,

    pub unit: Unit,
}

impl RecipePart {
    pub fn new(ingredient_id: IngredientId, name: impl Into<String>, quantity: Quantity, unit: Unit) -> Self {
        Self {
            ingredient_id,
            name: name.into(),
            quantity,
            unit,
        }
    }
}

/// A recipe as stored under `RECIPES/<id>`
///
/// # Examples
///
/// ```
/// use cookbook::domain::{Recipe, RecipePart, Quantity, Unit};
/// use cookbook::domain::ids::IngredientId;
///
/// let recipe = Recipe::builder()
///     .title("Tarte")
///     .cook_time("45")
///     .author("Bob")
///     .part(RecipePart::new(
///         IngredientId::new("i1").unwrap(),
///         "Farine",
///         Quantity::new(250.0).unwrap(),
///         Unit::Gram,
///     ))
///     .build()
///     .unwrap();
/// assert!(recipe.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Identifier; absent until the recipe is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,

    pub title: String,

    /// Cook time display string (e.g. "45" or "45 min")
    #[serde(default)]
    pub cook_time: String,

    /// Author display name
    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub image_url: String,

    /// Ordered recipe parts
    #[serde(default)]
    pub ingredients: Vec<RecipePart>,
}

impl Recipe {
    /// Creates a new builder for constructing a Recipe
    pub fn builder() -> RecipeBuilder {
        RecipeBuilder::default()
    }

    /// Checks the invariants that must hold before the recipe is written
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Recipe title cannot be empty".to_string());
        }
        for part in &self.ingredients {
            if part.name.trim().is_empty() {
                return Err(format!(
                    "Recipe part for ingredient {} has an empty name",
                    part.ingredient_id
                ));
            }
        }
        Ok(())
    }
}

/// Builder for constructing Recipe instances
#[derive(Debug, Default)]
pub struct RecipeBuilder {
    id: Option<RecipeId>,
    title: Option<String>,
    cook_time: String,
    author: String,
    image_url: String,
    ingredients: Vec<RecipePart>,
}

impl RecipeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: RecipeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn cook_time(mut self, cook_time: impl Into<String>) -> Self {
        self.cook_time = cook_time.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Appends a recipe part, keeping insertion order
    pub fn part(mut self, part: RecipePart) -> Self {
        self.ingredients.push(part);
        self
    }

    /// Builds the Recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the title is missing or the recipe is invalid
    pub fn build(self) -> Result<Recipe, String> {
        let recipe = Recipe {
            id: self.id,
            title: self.title.ok_or("title is required")?,
            cook_time: self.cook_time,
            author: self.author,
            image_url: self.image_url,
            ingredients: self.ingredients,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}
