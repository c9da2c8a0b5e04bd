//! Bearer token authentication extractor.
//!
//! Handlers that take a `CurrentUser` argument only run for requests
//! carrying a valid `Authorization: Bearer <token>` header naming an
//! existing user; everything else is rejected with 401 before the handler
//! body executes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated user for this request.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthenticated)?;

        let user_id = state
            .token_keys()
            .verify(token)
            .map_err(|_| AppError::Unauthenticated)?;

        // A valid token for a since-deleted user is still a dead session.
        UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}
