//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use signcraft_core::{Email, Phone, UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Columns carrying a UNIQUE constraint, in the order violations are
/// reported (first violation found wins).
const UNIQUE_COLUMNS: [&str; 3] = ["email", "username", "phone"];

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    phone: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserWithPasswordRow {
    id: i64,
    email: String,
    username: String,
    phone: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the violated column when
    /// the email, username, or phone is already taken.
    pub async fn create(
        &self,
        email: &Email,
        username: &Username,
        phone: &Phone,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO users (email, username, phone, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(email.as_str())
        .bind(username.as_str())
        .bind(phone.as_str())
        .bind(password_hash)
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| match unique_conflict_column(&e) {
            Some(column) => RepositoryError::Conflict(column.to_owned()),
            None => RepositoryError::Database(e),
        })?;

        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            email: email.clone(),
            username: username.clone(),
            phone: phone.clone(),
            created_at,
        })
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail validation.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, username, phone, created_at
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }

    /// Find a user by email or phone, returning the password hash alongside.
    ///
    /// Either identifier may be absent; an absent identifier matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail validation.
    pub async fn find_with_password(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithPasswordRow>(
            r"
            SELECT id, email, username, phone, password_hash, created_at
            FROM users
            WHERE email = ? OR phone = ?
            ",
        )
        .bind(email.unwrap_or(""))
        .bind(phone.unwrap_or(""))
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let password_hash = r.password_hash.clone();
        let user = row_to_user(UserRow {
            id: r.id,
            email: r.email,
            username: r.username,
            phone: r.phone,
            created_at: r.created_at,
        })?;

        Ok(Some((user, password_hash)))
    }

    /// Check which, if any, uniqueness constraint a registration would hit.
    ///
    /// This is an early exit only; the INSERT's UNIQUE constraints remain
    /// the final authority under concurrent registration.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn uniqueness_conflict(
        &self,
        email: &Email,
        username: &Username,
        phone: &Phone,
    ) -> Result<Option<&'static str>, RepositoryError> {
        let (email_taken, username_taken, phone_taken) =
            sqlx::query_as::<_, (bool, bool, bool)>(
                r"
                SELECT
                    EXISTS(SELECT 1 FROM users WHERE email = ?),
                    EXISTS(SELECT 1 FROM users WHERE username = ?),
                    EXISTS(SELECT 1 FROM users WHERE phone = ?)
                ",
            )
            .bind(email.as_str())
            .bind(username.as_str())
            .bind(phone.as_str())
            .fetch_one(self.pool)
            .await?;

        let taken = [email_taken, username_taken, phone_taken];
        Ok(UNIQUE_COLUMNS
            .iter()
            .zip(taken)
            .find_map(|(column, hit)| hit.then_some(*column)))
    }
}

fn row_to_user(row: UserRow) -> Result<User, RepositoryError> {
    let email = Email::parse(&row.email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;
    let username = Username::parse(&row.username).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
    })?;
    let phone = Phone::parse(&row.phone)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid phone in database: {e}")))?;

    Ok(User {
        id: UserId::new(row.id),
        email,
        username,
        phone,
        created_at: row.created_at,
    })
}

/// Identify which UNIQUE column an insert tripped over, if any.
fn unique_conflict_column(err: &sqlx::Error) -> Option<&'static str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }

    // SQLite reports "UNIQUE constraint failed: users.email".
    let message = db_err.message();
    UNIQUE_COLUMNS
        .iter()
        .find(|column| message.contains(&format!("users.{column}")))
        .copied()
}
