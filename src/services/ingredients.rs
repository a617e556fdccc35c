//! Ingredient catalog service over the `INGREDIENTS` collection

use crate::core::access::DocumentAccess;
use crate::domain::{Ingredient, IngredientId, Result};

/// Shared ingredient catalog
pub const INGREDIENTS: &str = "INGREDIENTS";

#[derive(Clone)]
pub struct IngredientsService {
    documents: DocumentAccess,
}

impl IngredientsService {
    pub fn new(documents: DocumentAccess) -> Self {
        Self { documents }
    }

    pub async fn get_all(&self) -> Result<Vec<Ingredient>> {
        self.documents.get_all_documents(INGREDIENTS).await
    }

    /// `None` when the catalog has no such ingredient
    pub async fn get_by_id(&self, id: &IngredientId) -> Result<Option<Ingredient>> {
        self.documents
            .get_document(&format!("{INGREDIENTS}/{id}"))
            .await
    }

    /// Adds or replaces a catalog entry
    pub async fn save(&self, ingredient: &Ingredient) -> Result<()> {
        self.documents
            .set_document(&format!("{INGREDIENTS}/{}", ingredient.id), ingredient)
            .await?;
        tracing::debug!(ingredient_id = %ingredient.id, "Ingredient saved");
        Ok(())
    }
}
