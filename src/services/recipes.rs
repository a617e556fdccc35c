//! Recipe service over the `RECIPES` collection

use crate::core::access::DocumentAccess;
use crate::core::query::{Filter, OrderBy};
use crate::domain::{CookbookError, DocumentPath, Recipe, RecipeId, Result};

/// Collection holding every recipe
pub const RECIPES: &str = "RECIPES";

fn recipe_path(id: &RecipeId) -> String {
    format!("{RECIPES}/{id}")
}

/// Stored recipes may omit their id; the document key is authoritative then
fn with_stored_id((path, mut recipe): (DocumentPath, Recipe)) -> Result<Recipe> {
    if recipe.id.is_none() {
        let id = RecipeId::new(path.id()).map_err(|e| CookbookError::decode(path.to_string(), e))?;
        recipe.id = Some(id);
    }
    Ok(recipe)
}

/// Recipe CRUD and author lookups
#[derive(Clone)]
pub struct RecipesService {
    documents: DocumentAccess,
}

impl RecipesService {
    pub fn new(documents: DocumentAccess) -> Self {
        Self { documents }
    }

    pub async fn get_all(&self) -> Result<Vec<Recipe>> {
        self.documents
            .list_documents(RECIPES)
            .await?
            .into_iter()
            .map(with_stored_id)
            .collect()
    }

    /// `None` when no recipe has this id
    pub async fn get_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>> {
        let recipe: Option<Recipe> = self.documents.get_document(&recipe_path(id)).await?;
        Ok(recipe.map(|mut recipe| {
            recipe.id.get_or_insert_with(|| id.clone());
            recipe
        }))
    }

    /// Recipes written by `author`, ordered by title
    ///
    /// Only exact author matches are returned, whatever the store yields.
    pub async fn get_by_author(&self, author: &str) -> Result<Vec<Recipe>> {
        let stored = self
            .documents
            .query_documents(
                RECIPES,
                &[Filter::eq("author", author)],
                Some(&OrderBy::from("title")),
            )
            .await?;

        let mut recipes = Vec::with_capacity(stored.len());
        for entry in stored {
            let recipe = with_stored_id(entry)?;
            if recipe.author == author {
                recipes.push(recipe);
            }
        }
        Ok(recipes)
    }

    /// Stores a new recipe and returns it with its id
    ///
    /// A random id is assigned when the recipe has none.
    ///
    /// # Errors
    ///
    /// [`CookbookError::Validation`] when the recipe breaks an invariant.
    pub async fn create(&self, mut recipe: Recipe) -> Result<Recipe> {
        recipe.validate().map_err(CookbookError::Validation)?;
        let id = recipe.id.get_or_insert_with(RecipeId::generate).clone();

        self.documents.set_document(&recipe_path(&id), &recipe).await?;
        tracing::info!(recipe_id = %id, title = %recipe.title, "Recipe created");
        Ok(recipe)
    }

    /// Replaces a stored recipe
    ///
    /// # Errors
    ///
    /// [`CookbookError::InvalidArgument`] without an id, before any store call.
    pub async fn update(&self, recipe: &Recipe) -> Result<()> {
        let id = recipe.id.as_ref().ok_or_else(|| {
            CookbookError::InvalidArgument("Cannot update a recipe without an id".to_string())
        })?;
        recipe.validate().map_err(CookbookError::Validation)?;

        self.documents.set_document(&recipe_path(id), recipe).await?;
        tracing::info!(recipe_id = %id, "Recipe updated");
        Ok(())
    }

    /// Removes a recipe; removing a missing recipe succeeds
    ///
    /// # Errors
    ///
    /// [`CookbookError::InvalidArgument`] for a blank id, before any store call.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = RecipeId::new(id).map_err(CookbookError::InvalidArgument)?;
        self.documents.delete_document(&recipe_path(&id)).await?;
        tracing::info!(recipe_id = %id, "Recipe deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::{IngredientId, Quantity, RecipePart, Unit};
    use std::sync::Arc;

    fn service() -> RecipesService {
        RecipesService::new(DocumentAccess::new(Arc::new(MemoryStore::new())))
    }

    fn recipe(title: &str, author: &str) -> Recipe {
        Recipe::builder().title(title).author(author).build().unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let service = service();
        let created = service.create(recipe("Tarte", "Alice")).await.unwrap();
        let id = created.id.clone().unwrap();

        let loaded = service.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_keeps_caller_id() {
        let service = service();
        let id = RecipeId::new("tarte-tatin").unwrap();
        let mut tarte = recipe("Tarte", "Alice");
        tarte.id = Some(id.clone());

        let created = service.create(tarte).await.unwrap();
        assert_eq!(created.id, Some(id));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let mut untitled = recipe("x", "Alice");
        untitled.title = " ".to_string();
        let err = service().create(untitled).await.unwrap_err();
        assert!(matches!(err, CookbookError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_by_author_orders_by_title() {
        let service = service();
        for (title, author) in [("Tarte", "Alice"), ("Crumble", "Alice"), ("Soupe", "Bob")] {
            service.create(recipe(title, author)).await.unwrap();
        }

        let titles: Vec<_> = service
            .get_by_author("Alice")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Crumble", "Tarte"]);
    }

    #[tokio::test]
    async fn test_update_replaces_parts() {
        let service = service();
        let mut tarte = service.create(recipe("Tarte", "Alice")).await.unwrap();
        tarte.ingredients.push(RecipePart::new(
            IngredientId::new("flour").unwrap(),
            "Farine",
            Quantity::new(250.0).unwrap(),
            Unit::Gram,
        ));

        service.update(&tarte).await.unwrap();
        let loaded = service.get_by_id(tarte.id.as_ref().unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.ingredients.len(), 1);
        assert_eq!(loaded.ingredients[0].unit, Unit::Gram);
    }

    #[tokio::test]
    async fn test_listed_recipes_take_id_from_path() {
        let documents = DocumentAccess::new(Arc::new(MemoryStore::new()));
        let stored = serde_json::json!({
            "title": "Soupe",
            "author": "Bob",
            "cookTime": "",
            "imageUrl": "",
            "ingredients": []
        });
        documents.set_document("RECIPES/soupe", &stored).await.unwrap();
        let service = RecipesService::new(documents);

        let all = service.get_all().await.unwrap();
        assert_eq!(all[0].id.as_ref().map(RecipeId::as_str), Some("soupe"));

        let mut by_bob = service.get_by_author("Bob").await.unwrap();
        assert_eq!(by_bob[0].id.as_ref().map(RecipeId::as_str), Some("soupe"));

        by_bob[0].title = "Soupe a l'oignon".to_string();
        service.update(&by_bob[0]).await.unwrap();
        service.delete("soupe").await.unwrap();
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_require_id() {
        let service = service();
        assert!(service
            .update(&recipe("Tarte", "Alice"))
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(service.delete("").await.unwrap_err().is_invalid_argument());
    }
}
