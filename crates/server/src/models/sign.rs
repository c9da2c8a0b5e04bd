//! Uploaded artwork domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use signcraft_core::{SignId, UserId};

/// A piece of uploaded artwork (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sign {
    /// Unique sign ID.
    pub id: SignId,
    /// User who uploaded the artwork.
    pub user_id: UserId,
    /// User-assigned name.
    pub name: String,
    /// Public path the stored file is served from.
    pub image_url: String,
    /// When the artwork was uploaded.
    pub created_at: DateTime<Utc>,
}
