//! Search history endpoints.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use signcraft_core::UserId;

use crate::db::SearchHistoryRepository;
use crate::error::AppError;
use crate::models::SearchEntry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSearchPayload {
    pub query: String,
    pub user_id: Option<i64>,
}

/// GET /search-history
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SearchEntry>>, AppError> {
    let entries = SearchHistoryRepository::new(state.pool())
        .recent(query.user_id.map(UserId::new))
        .await?;
    Ok(Json(entries))
}

/// POST /search-history
pub async fn log(
    State(state): State<AppState>,
    Json(payload): Json<LogSearchPayload>,
) -> Result<(StatusCode, Json<SearchEntry>), AppError> {
    if payload.query.trim().is_empty() {
        return Err(AppError::Validation("search query is required".into()));
    }

    let entry = SearchHistoryRepository::new(state.pool())
        .log(&payload.query, payload.user_id.map(UserId::new))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /search-history
pub async fn clear(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = query
        .user_id
        .map(UserId::new)
        .ok_or_else(|| AppError::Validation("userId is required".into()))?;

    let removed = SearchHistoryRepository::new(state.pool())
        .clear(user_id)
        .await?;

    tracing::debug!(user_id = %user_id, removed, "search history cleared");
    Ok(Json(json!({ "message": "search history cleared" })))
}
