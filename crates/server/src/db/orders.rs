//! Order repository for purchase operations.
//!
//! Every query that reads or writes a single order folds the ownership
//! check into the WHERE clause, so a foreign order and a nonexistent order
//! are indistinguishable to callers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use signcraft_core::{OrderId, OrderStatus, ProductId, UserId};

use super::products::{ProductRow, row_to_product};
use super::RepositoryError;
use crate::models::{Customization, Order};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    total_amount: String,
    status: String,
    customization: String,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order and link it to its product in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails; the
    /// transaction rolls back and no partial order is left behind.
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        total_amount: Decimal,
        customization: &Customization,
    ) -> Result<Order, RepositoryError> {
        let created_at = Utc::now();
        let customization_json = serde_json::to_string(customization)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO orders (user_id, total_amount, status, customization, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(user_id)
        .bind(total_amount.to_string())
        .bind(OrderStatus::Pending.to_string())
        .bind(&customization_json)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let order_id = OrderId::new(result.last_insert_rowid());

        sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?, ?)")
            .bind(order_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_for_user(order_id, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List a user's orders, newest first, with their linked products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, status, customization, address, created_at
            FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok(orders)
    }

    /// Get one of a user's orders by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn get_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, status, customization, address, created_at
            FROM orders
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Update the address and/or status of one of a user's orders.
    ///
    /// Absent fields keep their current value. The write is guarded on
    /// `observed_status`, the status the caller validated against: if the
    /// order has moved on since that read, nothing is written. Returns the
    /// updated order, or `None` when the user owns no such order or the
    /// guard did not match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn update_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
        address: Option<&str>,
        status: Option<OrderStatus>,
        observed_status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET address = COALESCE(?, address),
                status = COALESCE(?, status)
            WHERE id = ? AND user_id = ? AND status = ?
            ",
        )
        .bind(address)
        .bind(status.map(|s| s.to_string()))
        .bind(id)
        .bind(user_id)
        .bind(observed_status.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_for_user(id, user_id).await
    }

    /// Attach the linked products to a raw order row.
    async fn hydrate(&self, row: OrderRow) -> Result<Order, RepositoryError> {
        let product_rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.title, p.description, p.base_price, p.media_type, p.category,
                   p.image_url, p.featured, p.status, p.sizes, p.finish_options, p.created_at
            FROM products p
            JOIN order_products op ON op.product_id = p.id
            WHERE op.order_id = ?
            ",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let products = product_rows
            .into_iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        row_to_order(row, products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::products::NewProduct;
    use crate::db::{MIGRATOR, ProductRepository, UserRepository};
    use signcraft_core::{Email, Phone, Username};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_order(pool: &SqlitePool) -> (UserId, OrderId) {
        MIGRATOR.run(pool).await.unwrap();

        let user = UserRepository::new(pool)
            .create(
                &Email::parse("ada@example.com").unwrap(),
                &Username::parse("ada").unwrap(),
                &Phone::parse("5551230001").unwrap(),
                "not-a-real-hash",
            )
            .await
            .unwrap();

        let product = ProductRepository::new(pool)
            .create(NewProduct {
                title: "Banner",
                description: None,
                base_price: Decimal::new(2999, 2),
                media_type: "vinyl-banner",
                category: "banners",
                image_url: None,
                sizes: &[],
                finish_options: &[],
            })
            .await
            .unwrap();

        let customization = Customization {
            size: "2' x 4'".to_owned(),
            finish_option: "Hemmed edges".to_owned(),
            price: Decimal::new(2999, 2),
        };
        let order = OrderRepository::new(pool)
            .create(user.id, product.id, Decimal::new(2999, 2), &customization)
            .await
            .unwrap();

        (user.id, order.id)
    }

    #[tokio::test]
    async fn test_stale_status_guard_blocks_backward_write() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let (user_id, order_id) = seeded_order(&pool).await;
        let repo = OrderRepository::new(&pool);

        // One caller ships the order.
        let shipped = repo
            .update_for_user(
                order_id,
                user_id,
                None,
                Some(OrderStatus::Shipped),
                OrderStatus::Pending,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);

        // A second caller validated `paid` against the pending status it
        // read earlier; its guarded write must miss, not land.
        let stale = repo
            .update_for_user(
                order_id,
                user_id,
                Some("1 Infinite Loop"),
                Some(OrderStatus::Paid),
                OrderStatus::Pending,
            )
            .await
            .unwrap();
        assert!(stale.is_none());

        let current = repo.get_for_user(order_id, user_id).await.unwrap().unwrap();
        assert_eq!(current.status, OrderStatus::Shipped);
        assert_eq!(current.address, None);
    }

    #[tokio::test]
    async fn test_guarded_update_with_matching_status_lands() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let (user_id, order_id) = seeded_order(&pool).await;
        let repo = OrderRepository::new(&pool);

        let updated = repo
            .update_for_user(
                order_id,
                user_id,
                Some("1 Infinite Loop"),
                Some(OrderStatus::Paid),
                OrderStatus::Pending,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(updated.address.as_deref(), Some("1 Infinite Loop"));
    }
}

fn row_to_order(
    row: OrderRow,
    products: Vec<crate::models::Product>,
) -> Result<Order, RepositoryError> {
    let total_amount = Decimal::from_str(&row.total_amount).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid total amount in database: {e}"))
    })?;
    let status = OrderStatus::from_str(&row.status).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
    })?;
    let customization: Customization = serde_json::from_str(&row.customization).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid customization in database: {e}"))
    })?;

    Ok(Order {
        id: OrderId::new(row.id),
        user_id: UserId::new(row.user_id),
        total_amount,
        status,
        customization,
        address: row.address,
        created_at: row.created_at,
        products,
    })
}
