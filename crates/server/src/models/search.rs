//! Search history domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use signcraft_core::{SearchEntryId, UserId};

/// One logged search query (domain type).
///
/// A plain log: no ranking, no deduplication. Reads are capped at the ten
/// most recent entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    /// Unique entry ID.
    pub id: SearchEntryId,
    /// User the query belongs to, when known.
    pub user_id: Option<UserId>,
    /// The raw search query.
    pub query: String,
    /// When the search happened.
    pub created_at: DateTime<Utc>,
}
