//! Sign repository for uploaded artwork records.

use chrono::Utc;
use sqlx::SqlitePool;

use signcraft_core::{SignId, UserId};

use super::RepositoryError;
use crate::models::Sign;

/// Repository for sign database operations.
pub struct SignRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SignRepository<'a> {
    /// Create a new sign repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an uploaded artwork file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        image_url: &str,
    ) -> Result<Sign, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO signs (user_id, name, image_url, created_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(image_url)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        Ok(Sign {
            id: SignId::new(result.last_insert_rowid()),
            user_id,
            name: name.to_owned(),
            image_url: image_url.to_owned(),
            created_at,
        })
    }
}
