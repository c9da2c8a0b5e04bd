//! HTTP route handlers and router assembly.

pub mod auth;
pub mod orders;
pub mod products;
pub mod search_history;
pub mod signs;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/products", get(products::list).post(products::create))
        .route("/orders", post(orders::create))
        .route("/orders/user", get(orders::list_for_user))
        .route("/orders/{id}", get(orders::get).patch(orders::update))
        .route("/signs/upload", post(signs::upload))
        .route(
            "/search-history",
            get(search_history::recent)
                .post(search_history::log)
                .delete(search_history::clear),
        )
        .nest_service(
            "/uploads",
            ServeDir::new(state.config().upload_dir.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe; verifies the database answers.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
