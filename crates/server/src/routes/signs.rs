//! Artwork upload endpoint.

use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chrono::Utc;

use crate::db::SignRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::Sign;
use crate::state::AppState;

/// POST /signs/upload
///
/// Accepts a multipart form with a `file` part and a `name` part. The file
/// lands in the configured upload directory under a timestamped name and
/// is served back from `/uploads/`.
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Sign>), AppError> {
    let mut name: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                name = Some(value);
            }
            Some("file") => {
                let file_name = field.file_name().map(ToOwned::to_owned).ok_or_else(|| {
                    AppError::Validation("file part must carry a filename".into())
                })?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(name), Some((file_name, bytes))) = (name, file) else {
        return Err(AppError::Validation("file and name are required".into()));
    };

    // Strip any path components a hostile client may have embedded.
    let safe_name = Path::new(&file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("invalid filename".into()))?;
    let stored_name = format!("{}-{safe_name}", Utc::now().timestamp_millis());

    let upload_dir = &state.config().upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("creating upload directory: {e}")))?;
    tokio::fs::write(upload_dir.join(&stored_name), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("writing upload: {e}")))?;

    let image_url = format!("/uploads/{stored_name}");
    let sign = SignRepository::new(state.pool())
        .create(user.id, &name, &image_url)
        .await?;

    tracing::info!(sign_id = %sign.id, user_id = %user.id, "artwork uploaded");
    Ok((StatusCode::CREATED, Json(sign)))
}
