//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SIGNCRAFT_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`)
//! - `SIGNCRAFT_JWT_SECRET` - Token signing secret (min 32 chars, no default)
//!
//! ## Optional
//! - `SIGNCRAFT_HOST` - Bind address (default: 127.0.0.1)
//! - `SIGNCRAFT_PORT` - Listen port (default: 3000)
//! - `SIGNCRAFT_UPLOAD_DIR` - Artwork upload directory (default: public/uploads)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive).
///
/// Signing tokens with a placeholder secret silently breaks every deployed
/// credential the moment the real secret lands, so placeholders are
/// rejected at startup.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret-key",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` connection string.
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Bearer-token signing secret. Required; there is deliberately no
    /// built-in default.
    pub jwt_secret: SecretString,
    /// Directory artwork uploads are written to.
    pub upload_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the JWT secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env()?;
        let host = get_env_or_default("SIGNCRAFT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SIGNCRAFT_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("SIGNCRAFT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SIGNCRAFT_PORT".to_owned(), e.to_string()))?;

        let jwt_secret = get_required_env("SIGNCRAFT_JWT_SECRET").map(SecretString::from)?;
        validate_jwt_secret(&jwt_secret, "SIGNCRAFT_JWT_SECRET")?;

        let upload_dir = PathBuf::from(get_env_or_default("SIGNCRAFT_UPLOAD_DIR", "public/uploads"));

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            upload_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
///
/// Exposed so the CLI can reach the database without loading the full
/// server configuration (it has no use for the JWT secret).
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` when neither variable is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var("SIGNCRAFT_DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(
        "SIGNCRAFT_DATABASE_URL".to_owned(),
    ))
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that the JWT secret is long enough and not a placeholder.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();

    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
