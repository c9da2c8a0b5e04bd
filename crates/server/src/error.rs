//! Application error types and HTTP response mapping.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl is
//! the single place a failure becomes a status code and JSON body.
//! Internal detail never reaches the client, it goes to the logs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid bearer token.
    #[error("authentication required")]
    Unauthenticated,

    /// Authentication service error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Requested resource does not exist (or is not the caller's).
    #[error("not found")]
    NotFound,

    /// Repository error.
    #[error(transparent)]
    Database(#[from] RepositoryError),

    /// Anything else that should surface as a 500.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_owned())
            }
            Self::Auth(AuthError::InvalidCredential) => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_owned())
            }
            Self::Auth(
                e @ (AuthError::Conflict(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidUsername(_)
                | AuthError::InvalidPhone(_)
                | AuthError::WeakPassword(_)),
            ) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Auth(
                AuthError::PasswordHash | AuthError::TokenIssue | AuthError::Repository(_),
            ) => {
                tracing::error!(error = %self, "authentication failure");
                (StatusCode::INTERNAL_SERVER_ERROR, self.client_message())
            }
            Self::NotFound | Self::Database(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found".to_owned())
            }
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.client_message())
            }
        }
    }

    fn client_message(&self) -> String {
        "internal server error".to_owned()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
