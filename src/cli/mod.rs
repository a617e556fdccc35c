//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cookbook using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cookbook - recipe collection backend
#[derive(Parser, Debug)]
#[command(name = "cookbook")]
#[command(version, about, long_about = None)]
#[command(author = "Cookbook Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cookbook.toml", env = "COOKBOOK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COOKBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check the store connection and show document counts
    Status(commands::status::StatusArgs),

    /// Manage recipes
    Recipe(commands::recipe::RecipeArgs),

    /// Browse and seed the ingredient catalog
    Ingredient(commands::ingredient::IngredientArgs),

    /// Look up user profiles
    User(commands::user::UserArgs),

    /// Register or sign in to an account
    Account(commands::account::AccountArgs),
}
