//! Search history repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use signcraft_core::{SearchEntryId, UserId};

use super::RepositoryError;
use crate::models::SearchEntry;

/// Cap on how many entries a history read returns.
const RECENT_LIMIT: i64 = 10;

#[derive(sqlx::FromRow)]
struct SearchRow {
    id: i64,
    user_id: Option<i64>,
    query: String,
    created_at: DateTime<Utc>,
}

/// Repository for search history operations.
pub struct SearchHistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SearchHistoryRepository<'a> {
    /// Create a new search history repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Log one search query, optionally attributed to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn log(
        &self,
        query: &str,
        user_id: Option<UserId>,
    ) -> Result<SearchEntry, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO search_history (user_id, query, created_at)
            VALUES (?, ?, ?)
            ",
        )
        .bind(user_id)
        .bind(query)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        Ok(SearchEntry {
            id: SearchEntryId::new(result.last_insert_rowid()),
            user_id,
            query: query.to_owned(),
            created_at,
        })
    }

    /// The ten most recent entries, newest first.
    ///
    /// With a user ID the list is scoped to that user; without one it
    /// spans all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<SearchEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, SearchRow>(
            r"
            SELECT id, user_id, query, created_at
            FROM search_history
            WHERE (? IS NULL OR user_id = ?)
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(user_id)
        .bind(RECENT_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SearchEntry {
                id: SearchEntryId::new(row.id),
                user_id: row.user_id.map(UserId::new),
                query: row.query,
                created_at: row.created_at,
            })
            .collect())
    }

    /// Delete all of a user's entries. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM search_history WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
