//! Authentication service: registration, login, and password hashing.

pub mod error;
pub mod token;

pub use error::{AuthError, ConflictField};
pub use token::TokenKeys;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::SqlitePool;

use signcraft_core::{Email, Phone, Username};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Service for user authentication operations.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    keys: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, keys: &'a TokenKeys) -> Self {
        Self {
            users: UserRepository::new(pool),
            keys,
        }
    }

    /// Register a new account and issue a session token for it.
    ///
    /// Uniqueness is checked up front so the client gets a field-specific
    /// message, but the INSERT's constraints still decide races.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed fields, a conflict error
    /// when an identifier is taken, or an internal error if hashing or
    /// signing fails.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        phone: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        let username = Username::parse(username)?;
        let phone = Phone::parse(phone)?;
        validate_password(password)?;

        if let Some(column) = self.users.uniqueness_conflict(&email, &username, &phone).await? {
            if let Some(field) = ConflictField::from_column(column) {
                return Err(AuthError::Conflict(field));
            }
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &username, &phone, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(column) => match ConflictField::from_column(&column) {
                    Some(field) => AuthError::Conflict(field),
                    None => AuthError::Repository(RepositoryError::Conflict(column)),
                },
                other => AuthError::Repository(other),
            })?;

        let token = self.keys.issue(user.id)?;
        Ok((user, token))
    }

    /// Log in with an email or phone number plus password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` whether the account is
    /// missing or the password is wrong.
    pub async fn login(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let (user, password_hash) = self
            .users
            .find_with_password(email, phone)
            .await?
            .ok_or(AuthError::InvalidCredential)?;

        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredential);
        }

        let token = self.keys.issue(user.id)?;
        Ok((user, token))
    }
}

/// Reject passwords below the minimum length.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` with a client-facing message.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Check a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the stored hash is unparseable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| AuthError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
