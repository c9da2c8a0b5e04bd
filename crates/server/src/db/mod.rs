//! Database operations for the Signcraft `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Account identities (unique email/username/phone)
//! - `products` - Catalog entries with embedded size/finish options
//! - `orders` + `order_products` - Purchase intents and their product links
//! - `signs` - Uploaded artwork records
//! - `search_history` - Per-user search query log
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p signcraft-cli -- migrate
//! ```

pub mod orders;
pub mod products;
pub mod search_history;
pub mod signs;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use search_history::SearchHistoryRepository;
pub use signs::SignRepository;
pub use users::UserRepository;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Embedded migrations, shared by the server tests and the CLI.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur in repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation; the payload names the violated column.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the
/// database cannot be opened.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
