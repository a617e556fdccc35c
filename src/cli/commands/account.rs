//! Account commands against the configured auth provider

use super::{connect, report};
use crate::domain::User;
use clap::{Args, Subcommand};

/// Arguments for the account command
#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Create an account and its profile
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "COOKBOOK_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        display_name: String,
    },

    /// Sign in and show the profile
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long, env = "COOKBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

fn print_user(user: &User) {
    println!("👤 {} <{}>", user.display_name, user.email);
    if let Some(uid) = &user.uid {
        println!("  UID: {uid}");
    }
}

impl AccountArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let services = match connect(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        match &self.command {
            AccountCommand::Register {
                email,
                password,
                display_name,
            } => match services.auth.register(email, password, display_name).await {
                Ok(user) => {
                    println!("✅ Account registered");
                    print_user(&user);
                    Ok(0)
                }
                Err(e) => Ok(report("Registration failed", &e)),
            },
            AccountCommand::SignIn { email, password } => {
                match services.auth.sign_in(email, password).await {
                    Ok(user) => {
                        println!("✅ Signed in");
                        print_user(&user);
                        Ok(0)
                    }
                    Err(e) => Ok(report("Sign-in failed", &e)),
                }
            }
        }
    }
}
