//! Registration and login endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub username: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let service = AuthService::new(state.pool(), state.token_keys());
    let (user, token) = service
        .register(
            &payload.email,
            &payload.username,
            &payload.phone,
            &payload.password,
        )
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    if payload.email.is_none() && payload.phone.is_none() {
        return Err(AppError::Validation("email or phone is required".into()));
    }

    let service = AuthService::new(state.pool(), state.token_keys());
    let (user, token) = service
        .login(
            payload.email.as_deref(),
            payload.phone.as_deref(),
            &payload.password,
        )
        .await?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { token, user }))
}
