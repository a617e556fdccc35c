// Cookbook - Recipe collection backend
// Copyright (c) 2025 Cookbook Contributors
// Licensed under the MIT License

use clap::Parser;
use cookbook::cli::{Cli, Commands};
use cookbook::config::LoggingConfig;
use cookbook::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Cookbook");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Recipe(args) => args.execute(&cli.config).await,
        Commands::Ingredient(args) => args.execute(&cli.config).await,
        Commands::User(args) => args.execute(&cli.config).await,
        Commands::Account(args) => args.execute(&cli.config).await,
    }
}
