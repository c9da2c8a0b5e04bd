//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use signcraft_core::{OrderId, OrderStatus, UserId};

use super::Product;

/// Snapshot of a customer's configuration, attached to an order at
/// creation time and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    /// Chosen size description, e.g. `3' x 6'` or `3x6` for custom sizes.
    pub size: String,
    /// Chosen finish display name.
    pub finish_option: String,
    /// Price computed at order-creation time.
    pub price: Decimal,
}

/// A purchase intent (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user; every order belongs to exactly one.
    pub user_id: UserId,
    /// Total charged, equal to the price computed at creation.
    pub total_amount: Decimal,
    /// Fulfillment status, forward-only.
    pub status: OrderStatus,
    /// Configuration snapshot from checkout.
    pub customization: Customization,
    /// Shipping address, settable after creation.
    pub address: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Products this order was created against.
    pub products: Vec<Product>,
}
