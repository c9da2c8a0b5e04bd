//! Order creation and retrieval endpoints.
//!
//! The server recomputes the price from the stored catalog options at
//! creation time; the client-sent total is accepted only when it matches.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use signcraft_core::pricing::{Dimensions, PRICE_SCALE, quote};
use signcraft_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{Customization, Order};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationPayload {
    pub size_id: String,
    pub finish_id: String,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub media_type_id: String,
    pub customization: CustomizationPayload,
    pub total_amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    pub address: Option<String>,
    pub status: Option<OrderStatus>,
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let product = ProductRepository::new(state.pool())
        .find_active_by_media_type(&payload.media_type_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let size = product
        .size_option(&payload.customization.size_id)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "unknown size option '{}'",
                payload.customization.size_id
            ))
        })?;
    let finish = product
        .finish_option(&payload.customization.finish_id)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "unknown finish option '{}'",
                payload.customization.finish_id
            ))
        })?;

    let dimensions = match (payload.customization.width, payload.customization.height) {
        (Some(width), Some(height)) => Some(Dimensions::new(width, height)),
        _ => None,
    };

    let quoted = quote(size, finish, dimensions)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if quoted != payload.total_amount.round_dp(PRICE_SCALE) {
        return Err(AppError::Validation(format!(
            "totalAmount does not match the computed price {quoted}"
        )));
    }

    // Per-area sizes snapshot the actual dimensions; flat sizes snapshot
    // the option's display name.
    let size_description = if size.pricing.needs_dimensions() {
        match dimensions {
            Some(dims) => format!("{}x{}", dims.width, dims.height),
            None => size.name.clone(),
        }
    } else {
        size.name.clone()
    };

    let customization = Customization {
        size: size_description,
        finish_option: finish.name.clone(),
        price: quoted,
    };

    let order = OrderRepository::new(state.pool())
        .create(user.id, product.id, quoted, &customization)
        .await?;

    tracing::info!(order_id = %order.id, user_id = %user.id, total = %quoted, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/user
pub async fn list_for_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(OrderId::new(id), user.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(order))
}

/// PATCH /orders/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<Json<Order>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let id = OrderId::new(id);

    // Validate against a fresh read, then write guarded on that read. If a
    // concurrent transition lands in between, the guarded write misses and
    // we re-validate. The status only ever moves forward through four
    // states, so this terminates.
    loop {
        let current = repo
            .get_for_user(id, user.id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(next) = payload.status {
            if !current.status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "cannot move order from {} back to {}",
                    current.status, next
                )));
            }
        }

        if let Some(order) = repo
            .update_for_user(
                id,
                user.id,
                payload.address.as_deref(),
                payload.status,
                current.status,
            )
            .await?
        {
            return Ok(Json(order));
        }
    }
}
