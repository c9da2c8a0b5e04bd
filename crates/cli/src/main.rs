//! Signcraft CLI - Database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! signcraft-cli migrate
//!
//! # Seed the catalog with the stock banner products
//! signcraft-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog with the stock products (idempotent)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "signcraft-cli")]
#[command(author, version, about = "Signcraft CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with the stock products
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
