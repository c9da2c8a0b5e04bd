//! Database migration command.
//!
//! Reads the connection string from `SIGNCRAFT_DATABASE_URL` (or
//! `DATABASE_URL`) and applies the embedded migrations.

use signcraft_server::config::database_url_from_env;
use signcraft_server::db::{self, MIGRATOR};

use super::CliError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the database cannot be
/// opened, or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
