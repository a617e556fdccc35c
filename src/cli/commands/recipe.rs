//! Recipe commands

use super::{connect, report};
use crate::domain::{IngredientId, Quantity, Recipe, RecipeId, RecipePart, Unit};
use crate::services::Services;
use clap::{Args, Subcommand};

/// Arguments for the recipe command
#[derive(Args, Debug)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// List recipes, optionally only those of one author
    List {
        #[arg(long)]
        author: Option<String>,
    },

    /// Show one recipe with its parts
    Show { id: String },

    /// Create a recipe
    Add(AddRecipeArgs),

    /// Change fields of an existing recipe
    Edit(EditRecipeArgs),

    /// Delete a recipe
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct AddRecipeArgs {
    #[arg(long)]
    pub title: String,

    /// Cook time as displayed, e.g. "45 min"
    #[arg(long, default_value = "")]
    pub cook_time: String,

    #[arg(long, default_value = "")]
    pub author: String,

    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Recipe part as `<ingredient-id>:<quantity>:<unit>`, repeatable
    #[arg(long = "part")]
    pub parts: Vec<String>,

    /// Explicit id; a random one is generated otherwise
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditRecipeArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub cook_time: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Replaces every part, `<ingredient-id>:<quantity>:<unit>`, repeatable
    #[arg(long = "part")]
    pub parts: Vec<String>,

    /// Remove every part
    #[arg(long, conflicts_with = "parts")]
    pub clear_parts: bool,
}

/// Parses `<ingredient-id>:<quantity>:<unit>`
fn parse_part(raw: &str) -> Result<(IngredientId, Quantity, Unit), String> {
    let mut fields = raw.splitn(3, ':');
    let (Some(id), Some(quantity), Some(unit)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(format!(
            "Invalid part '{raw}', expected <ingredient-id>:<quantity>:<unit>"
        ));
    };

    let id = IngredientId::new(id.trim())?;
    let quantity = quantity
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid quantity '{quantity}': {e}"))
        .and_then(Quantity::new)?;
    let unit = unit.trim().parse::<Unit>()?;
    Ok((id, quantity, unit))
}

fn print_recipe(recipe: &Recipe) {
    let id = recipe.id.as_ref().map(RecipeId::as_str).unwrap_or("-");
    println!("📖 {} ({id})", recipe.title);
    if !recipe.author.is_empty() {
        println!("  Author: {}", recipe.author);
    }
    if !recipe.cook_time.is_empty() {
        println!("  Cook time: {}", recipe.cook_time);
    }
    if !recipe.image_url.is_empty() {
        println!("  Image: {}", recipe.image_url);
    }
    for part in &recipe.ingredients {
        println!(
            "  - {} {} {} ({})",
            part.quantity,
            part.unit.label(),
            part.name,
            part.ingredient_id
        );
    }
}

impl RecipeArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let services = match connect(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        match &self.command {
            RecipeCommand::List { author } => list(&services, author.as_deref()).await,
            RecipeCommand::Show { id } => show(&services, id).await,
            RecipeCommand::Add(args) => add(&services, args).await,
            RecipeCommand::Edit(args) => edit(&services, args).await,
            RecipeCommand::Delete { id } => delete(&services, id).await,
        }
    }
}

async fn list(services: &Services, author: Option<&str>) -> anyhow::Result<i32> {
    let result = match author {
        Some(author) => services.recipes.get_by_author(author).await,
        None => services.recipes.get_all().await,
    };

    let recipes = match result {
        Ok(r) => r,
        Err(e) => return Ok(report("Failed to list recipes", &e)),
    };

    if recipes.is_empty() {
        println!("No recipes found.");
        return Ok(0);
    }

    println!("{:<38} {:<30} {:<20} {:<10}", "ID", "Title", "Author", "Cook time");
    println!("{}", "-".repeat(100));
    for recipe in &recipes {
        println!(
            "{:<38} {:<30} {:<20} {:<10}",
            recipe.id.as_ref().map(RecipeId::as_str).unwrap_or("-"),
            recipe.title,
            recipe.author,
            recipe.cook_time
        );
    }
    println!();
    println!("{} recipe(s)", recipes.len());
    Ok(0)
}

async fn show(services: &Services, id: &str) -> anyhow::Result<i32> {
    let id = match RecipeId::new(id) {
        Ok(id) => id,
        Err(e) => {
            println!("❌ {e}");
            return Ok(3);
        }
    };

    match services.recipes.get_by_id(&id).await {
        Ok(Some(recipe)) => {
            print_recipe(&recipe);
            Ok(0)
        }
        Ok(None) => {
            println!("❌ Recipe not found: {id}");
            Ok(3)
        }
        Err(e) => Ok(report("Failed to load recipe", &e)),
    }
}

/// Resolves raw part arguments against the ingredient catalog
///
/// On failure the problem is printed and the exit code returned.
async fn resolve_parts(services: &Services, raw_parts: &[String]) -> Result<Vec<RecipePart>, i32> {
    let mut parts = Vec::with_capacity(raw_parts.len());
    for raw in raw_parts {
        let (ingredient_id, quantity, unit) = parse_part(raw).map_err(|e| {
            println!("❌ {e}");
            3
        })?;

        let ingredient = match services.ingredients.get_by_id(&ingredient_id).await {
            Ok(Some(ingredient)) => ingredient,
            Ok(None) => {
                println!("❌ Unknown ingredient: {ingredient_id}");
                return Err(3);
            }
            Err(e) => return Err(report("Failed to load ingredient", &e)),
        };

        if !ingredient.accepts(unit) {
            println!("❌ {} cannot be measured in {}", ingredient.name, unit.label());
            return Err(3);
        }

        parts.push(RecipePart::new(ingredient_id, ingredient.name, quantity, unit));
    }
    Ok(parts)
}

async fn add(services: &Services, args: &AddRecipeArgs) -> anyhow::Result<i32> {
    let mut builder = Recipe::builder()
        .title(&args.title)
        .cook_time(&args.cook_time)
        .author(&args.author)
        .image_url(&args.image_url);

    if let Some(id) = &args.id {
        match RecipeId::new(id.as_str()) {
            Ok(id) => builder = builder.id(id),
            Err(e) => {
                println!("❌ {e}");
                return Ok(3);
            }
        }
    }

    let parts = match resolve_parts(services, &args.parts).await {
        Ok(parts) => parts,
        Err(code) => return Ok(code),
    };
    for part in parts {
        builder = builder.part(part);
    }

    let recipe = match builder.build() {
        Ok(r) => r,
        Err(e) => {
            println!("❌ {e}");
            return Ok(3);
        }
    };

    match services.recipes.create(recipe).await {
        Ok(created) => {
            println!("✅ Recipe created");
            print_recipe(&created);
            Ok(0)
        }
        Err(e) => Ok(report("Failed to create recipe", &e)),
    }
}

async fn edit(services: &Services, args: &EditRecipeArgs) -> anyhow::Result<i32> {
    let id = match RecipeId::new(args.id.as_str()) {
        Ok(id) => id,
        Err(e) => {
            println!("❌ {e}");
            return Ok(3);
        }
    };

    let mut recipe = match services.recipes.get_by_id(&id).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => {
            println!("❌ Recipe not found: {id}");
            return Ok(3);
        }
        Err(e) => return Ok(report("Failed to load recipe", &e)),
    };

    if let Some(title) = &args.title {
        recipe.title = title.clone();
    }
    if let Some(cook_time) = &args.cook_time {
        recipe.cook_time = cook_time.clone();
    }
    if let Some(author) = &args.author {
        recipe.author = author.clone();
    }
    if let Some(image_url) = &args.image_url {
        recipe.image_url = image_url.clone();
    }
    if args.clear_parts {
        recipe.ingredients.clear();
    } else if !args.parts.is_empty() {
        recipe.ingredients = match resolve_parts(services, &args.parts).await {
            Ok(parts) => parts,
            Err(code) => return Ok(code),
        };
    }

    match services.recipes.update(&recipe).await {
        Ok(()) => {
            println!("✅ Recipe updated");
            print_recipe(&recipe);
            Ok(0)
        }
        Err(e) => Ok(report("Failed to update recipe", &e)),
    }
}

async fn delete(services: &Services, id: &str) -> anyhow::Result<i32> {
    match services.recipes.delete(id).await {
        Ok(()) => {
            println!("✅ Recipe deleted: {id}");
            Ok(0)
        }
        Err(e) => Ok(report("Failed to delete recipe", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use crate::core::connection::Connections;
    use crate::domain::Ingredient;
    use test_case::test_case;

    const CONFIG: &str = r#"
database_target = "memory"

[platform]
api_key = "AIza-test"
project_id = "cookbook-dev"
app_id = "1:123:web:abc"
"#;

    async fn services_with_tarte() -> Services {
        let connections = Connections::new(load_config_str(CONFIG).unwrap());
        let services = Services::new(&connections).await.unwrap();

        for (id, name, units) in [
            ("flour", "Farine", vec![Unit::Gram, Unit::Kilogram]),
            ("egg", "Oeuf", vec![Unit::Piece]),
        ] {
            let ingredient = Ingredient::new(IngredientId::new(id).unwrap(), name).with_units(units);
            services.ingredients.save(&ingredient).await.unwrap();
        }

        let tarte = Recipe::builder()
            .id(RecipeId::new("tarte").unwrap())
            .title("Tarte")
            .author("Alice")
            .cook_time("45 min")
            .part(RecipePart::new(
                IngredientId::new("flour").unwrap(),
                "Farine",
                Quantity::new(250.0).unwrap(),
                Unit::Gram,
            ))
            .build()
            .unwrap();
        services.recipes.create(tarte).await.unwrap();
        services
    }

    fn edit_args(id: &str) -> EditRecipeArgs {
        EditRecipeArgs {
            id: id.to_string(),
            title: None,
            cook_time: None,
            author: None,
            image_url: None,
            parts: Vec::new(),
            clear_parts: false,
        }
    }

    async fn stored_tarte(services: &Services) -> Recipe {
        let id = RecipeId::new("tarte").unwrap();
        services.recipes.get_by_id(&id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_edit_changes_only_given_fields() {
        let services = services_with_tarte().await;
        let before = stored_tarte(&services).await;

        let args = EditRecipeArgs {
            title: Some("Tarte Tatin".to_string()),
            parts: vec!["egg:3:unite".to_string(), "flour:0.2:kg".to_string()],
            ..edit_args("tarte")
        };
        assert_eq!(edit(&services, &args).await.unwrap(), 0);

        let after = stored_tarte(&services).await;
        assert_eq!(after.title, "Tarte Tatin");
        assert_eq!(after.author, before.author);
        assert_eq!(after.cook_time, before.cook_time);
        let units: Vec<_> = after.ingredients.iter().map(|p| p.unit).collect();
        assert_eq!(units, vec![Unit::Piece, Unit::Kilogram]);
        assert_eq!(after.ingredients[0].name, "Oeuf");
    }

    #[tokio::test]
    async fn test_edit_clear_parts() {
        let services = services_with_tarte().await;
        let args = EditRecipeArgs {
            clear_parts: true,
            ..edit_args("tarte")
        };
        assert_eq!(edit(&services, &args).await.unwrap(), 0);
        assert!(stored_tarte(&services).await.ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_edit_rejections_leave_recipe_unchanged() {
        let services = services_with_tarte().await;
        let before = stored_tarte(&services).await;

        assert_eq!(edit(&services, &edit_args("missing")).await.unwrap(), 3);

        let blank_title = EditRecipeArgs {
            title: Some("  ".to_string()),
            ..edit_args("tarte")
        };
        assert_eq!(edit(&services, &blank_title).await.unwrap(), 3);

        let wrong_unit = EditRecipeArgs {
            parts: vec!["egg:2:g".to_string()],
            ..edit_args("tarte")
        };
        assert_eq!(edit(&services, &wrong_unit).await.unwrap(), 3);

        assert_eq!(stored_tarte(&services).await, before);
    }

    #[test]
    fn test_parse_part() {
        let (id, quantity, unit) = parse_part("flour:250:g").unwrap();
        assert_eq!(id.as_str(), "flour");
        assert_eq!(quantity.value(), 250.0);
        assert_eq!(unit, Unit::Gram);

        let (_, quantity, unit) = parse_part("salt : 0.5 : pincee").unwrap();
        assert_eq!(quantity.value(), 0.5);
        assert_eq!(unit, Unit::Pinch);
    }

    #[test_case("flour:250" ; "missing unit")]
    #[test_case(":250:g" ; "blank ingredient")]
    #[test_case("flour:-1:g" ; "negative quantity")]
    #[test_case("flour:lots:g" ; "non numeric quantity")]
    #[test_case("flour:250:oz" ; "unknown unit")]
    fn test_parse_part_rejects(raw: &str) {
        assert!(parse_part(raw).is_err());
    }
}
