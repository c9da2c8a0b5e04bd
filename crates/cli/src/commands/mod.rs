//! CLI command implementations.

pub mod migrate;
pub mod seed;

use signcraft_server::config::ConfigError;
use signcraft_server::db::RepositoryError;

/// Errors shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
