//! Catalog browsing and product creation endpoints.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use signcraft_core::{FinishOption, SizeOption, first_duplicate_id};

use crate::db::products::NewProduct;
use crate::db::ProductRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub media_type: String,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub finish_options: Vec<FinishOption>,
}

/// GET /products
///
/// Lists active products, newest first. `?category=` narrows the list;
/// the sentinel value `all` means no filter.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category = query.category.as_deref().filter(|c| *c != "all");
    let products = ProductRepository::new(state.pool())
        .list_active(category)
        .await?;
    Ok(Json(products))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    validate(&payload)?;

    let product = ProductRepository::new(state.pool())
        .create(NewProduct {
            title: &payload.title,
            description: payload.description.as_deref(),
            base_price: payload.price,
            media_type: &payload.media_type,
            category: &payload.category,
            image_url: payload.image_url.as_deref(),
            sizes: &payload.sizes,
            finish_options: &payload.finish_options,
        })
        .await?;

    tracing::info!(product_id = %product.id, user_id = %user.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

fn validate(payload: &CreateProductPayload) -> Result<(), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if payload.media_type.trim().is_empty() {
        return Err(AppError::Validation("mediaType is required".into()));
    }
    if payload.category.trim().is_empty() {
        return Err(AppError::Validation("category is required".into()));
    }
    if payload.price <= Decimal::ZERO {
        return Err(AppError::Validation("price must be positive".into()));
    }
    if let Some(id) = first_duplicate_id(payload.sizes.iter().map(|s| s.id.as_str())) {
        return Err(AppError::Validation(format!("duplicate size id '{id}'")));
    }
    if let Some(id) = first_duplicate_id(payload.finish_options.iter().map(|f| f.id.as_str())) {
        return Err(AppError::Validation(format!("duplicate finish id '{id}'")));
    }
    Ok(())
}
