//! User profile commands

use super::{connect, report};
use clap::{Args, Subcommand};

/// Arguments for the user command
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Show the profile stored for an auth subject id
    Show { uid: String },
}

impl UserArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let services = match connect(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        match &self.command {
            UserCommand::Show { uid } => match services.users.get_by_uid(uid).await {
                Ok(Some(user)) => {
                    println!("👤 {} <{}>", user.display_name, user.email);
                    println!("  UID: {uid}");
                    if let Some(photo_url) = &user.photo_url {
                        println!("  Photo: {photo_url}");
                    }
                    Ok(0)
                }
                Ok(None) => {
                    println!("❌ User not found: {uid}");
                    Ok(3)
                }
                Err(e) => Ok(report("Failed to load user", &e)),
            },
        }
    }
}
