//! Shared application state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::auth::TokenKeys;

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    token_keys: TokenKeys,
}

impl AppState {
    /// Build the state, deriving token keys from the configured secret.
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        let token_keys = TokenKeys::new(&config.jwt_secret);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                token_keys,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Bearer token keys.
    #[must_use]
    pub fn token_keys(&self) -> &TokenKeys {
        &self.inner.token_keys
    }
}
