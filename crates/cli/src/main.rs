//! Sanndikaa CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (app tables and session store)
//! sanndikaa-cli migrate
//!
//! # Create a seller and their shop
//! sanndikaa-cli seller create -e awa@example.com -p secret123 -n "Awa's Kitchen" -w 7001122
//!
//! # Load a demo shop for local development
//! sanndikaa-cli seed demo
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seller create` - Register a seller without the web form
//! - `seed demo` - Seed a demo shop with products

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sanndikaa-cli")]
#[command(author, version, about = "Sanndikaa CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage sellers
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Seed the database with sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// Register a seller and create their shop
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Shop name
        #[arg(short, long)]
        name: String,

        /// WhatsApp number, local (7 digits) or with country code
        #[arg(short, long)]
        whatsapp: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create a demo seller, shop and products
    Demo,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seller { action } => match action {
            SellerAction::Create {
                email,
                password,
                name,
                whatsapp,
            } => {
                commands::seller::create(&email, &password, &name, &whatsapp).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Demo => commands::seed::demo().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seller_create() {
        let cli = Cli::try_parse_from([
            "sanndikaa-cli",
            "seller",
            "create",
            "-e",
            "awa@example.com",
            "-p",
            "secret123",
            "-n",
            "Awa's Kitchen",
            "-w",
            "7001122",
        ])
        .map_err(|e| e.to_string());
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Seller {
                    action: SellerAction::Create { .. }
                }
            })
        ));
    }
}
