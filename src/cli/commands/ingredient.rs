//! Ingredient catalog commands

use super::{connect, report};
use crate::domain::{Ingredient, IngredientId};
use crate::services::Services;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Arguments for the ingredient command
#[derive(Args, Debug)]
pub struct IngredientArgs {
    #[command(subcommand)]
    pub command: IngredientCommand,
}

#[derive(Subcommand, Debug)]
pub enum IngredientCommand {
    /// List the catalog
    List,

    /// Show one ingredient
    Show { id: String },

    /// Seed the catalog from a JSON array of ingredients
    Import { file: PathBuf },
}

impl IngredientArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        // Parse the import file before connecting
        let to_import = match &self.command {
            IngredientCommand::Import { file } => match read_catalog(file) {
                Ok(ingredients) => Some(ingredients),
                Err(e) => {
                    println!("❌ Failed to read {}", file.display());
                    println!("   Error: {e}");
                    return Ok(3);
                }
            },
            _ => None,
        };

        let services = match connect(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        match &self.command {
            IngredientCommand::List => list(&services).await,
            IngredientCommand::Show { id } => show(&services, id).await,
            IngredientCommand::Import { .. } => {
                import(&services, to_import.unwrap_or_default()).await
            }
        }
    }
}

fn read_catalog(file: &Path) -> anyhow::Result<Vec<Ingredient>> {
    let contents = std::fs::read_to_string(file)?;
    Ok(serde_json::from_str(&contents)?)
}

fn units(ingredient: &Ingredient) -> String {
    ingredient
        .units
        .iter()
        .map(|unit| unit.code())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn list(services: &Services) -> anyhow::Result<i32> {
    let ingredients = match services.ingredients.get_all().await {
        Ok(i) => i,
        Err(e) => return Ok(report("Failed to list ingredients", &e)),
    };

    if ingredients.is_empty() {
        println!("The ingredient catalog is empty.");
        println!("Run 'cookbook ingredient import <file>' to seed it.");
        return Ok(0);
    }

    println!("{:<20} {:<30} {:>8}  {}", "ID", "Name", "Default", "Units");
    println!("{}", "-".repeat(80));
    for ingredient in &ingredients {
        println!(
            "{:<20} {:<30} {:>8}  {}",
            ingredient.id,
            ingredient.name,
            ingredient.quantity,
            units(ingredient)
        );
    }
    Ok(0)
}

async fn show(services: &Services, id: &str) -> anyhow::Result<i32> {
    let id = match IngredientId::new(id) {
        Ok(id) => id,
        Err(e) => {
            println!("❌ {e}");
            return Ok(3);
        }
    };

    match services.ingredients.get_by_id(&id).await {
        Ok(Some(ingredient)) => {
            println!("🥕 {} ({})", ingredient.name, ingredient.id);
            println!("  Default quantity: {}", ingredient.quantity);
            println!("  Units: {}", units(&ingredient));
            Ok(0)
        }
        Ok(None) => {
            println!("❌ Ingredient not found: {id}");
            Ok(3)
        }
        Err(e) => Ok(report("Failed to load ingredient", &e)),
    }
}

async fn import(services: &Services, ingredients: Vec<Ingredient>) -> anyhow::Result<i32> {
    for ingredient in &ingredients {
        if let Err(e) = services.ingredients.save(ingredient).await {
            return Ok(report(&format!("Failed to save {}", ingredient.id), &e));
        }
    }
    println!("✅ Imported {} ingredient(s)", ingredients.len());
    Ok(0)
}
