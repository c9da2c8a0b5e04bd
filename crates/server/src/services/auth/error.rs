//! Authentication error types.

use signcraft_core::{EmailError, PhoneError, UsernameError};

use crate::db::RepositoryError;

/// Which unique account field a registration collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
    Phone,
}

impl ConflictField {
    /// Map a database column name to the conflicting field.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "email" => Some(Self::Email),
            "username" => Some(Self::Username),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    /// Client-facing message for this conflict.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Email => "this email is already registered",
            Self::Username => "this username is already taken",
            Self::Phone => "this phone number is already registered",
        }
    }
}

/// Errors that can occur during authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Login identifier or password did not match. Deliberately vague so
    /// callers cannot probe which part was wrong.
    #[error("invalid credentials")]
    InvalidCredential,

    /// A unique account field is already taken.
    #[error("{}", .0.message())]
    Conflict(ConflictField),

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Phone number failed validation.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Password does not meet the minimum requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Password hashing or verification failed internally.
    #[error("password hashing failed")]
    PasswordHash,

    /// Token signing failed internally.
    #[error("token issuance failed")]
    TokenIssue,

    /// Underlying repository error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
