//! Status command implementation
//!
//! Checks the store connection and reports document counts per collection.

use super::report;
use crate::config::load_config;
use crate::core::connection::Connections;
use crate::services::{INGREDIENTS, RECIPES, USERS};
use clap::Args;
use serde_json::Value;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Create the backing container/table when missing
    #[arg(long)]
    pub setup: bool,
}

impl StatusArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking store status");

        println!("📊 Cookbook Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report("Failed to load configuration file", &e)),
        };
        let connections = Connections::new(config);

        let store = match connections.store().await {
            Ok(s) => s,
            Err(e) => return Ok(report("Failed to create document store", &e)),
        };
        let auth = match connections.auth().await {
            Ok(a) => a,
            Err(e) => return Ok(report("Failed to create auth client", &e)),
        };

        println!("  Store: {}", store.backend());
        println!("  Auth: {}", auth.provider());
        println!();

        if self.setup {
            if let Err(e) = store.ensure_storage_exists().await {
                return Ok(report("Failed to prepare storage", &e));
            }
            println!("✅ Storage ready");
        }

        if let Err(e) = store.test_connection().await {
            return Ok(report("Failed to connect to document store", &e));
        }
        println!("✅ Connected");
        println!();

        let documents = match connections.documents().await {
            Ok(d) => d,
            Err(e) => return Ok(report("Failed to open document access", &e)),
        };

        println!("{:<15} {:>10}", "Collection", "Documents");
        println!("{}", "-".repeat(26));
        for collection in [RECIPES, INGREDIENTS, USERS] {
            match documents.get_all_documents::<Value>(collection).await {
                Ok(docs) => println!("{:<15} {:>10}", collection, docs.len()),
                Err(e) => return Ok(report(&format!("Failed to list {collection}"), &e)),
            }
        }
        println!();

        Ok(0)
    }
}
