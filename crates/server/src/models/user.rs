//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use signcraft_core::{Email, Phone, UserId, Username};

/// An account identity (domain type).
///
/// The password hash never lives here; repositories hand it out separately
/// for the one code path that verifies it, so serializing a `User` can
/// never leak it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique).
    pub email: Email,
    /// Display username (unique).
    pub username: Username,
    /// Phone number (unique).
    pub phone: Phone,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
