//! Product repository for catalog operations.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use signcraft_core::{FinishOption, ProductId, ProductStatus, SizeOption};

use super::RepositoryError;
use crate::models::Product;

/// Input for creating a catalog entry. Option lists are stored as JSON
/// documents alongside the scalar columns.
#[derive(Debug)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub base_price: Decimal,
    pub media_type: &'a str,
    pub category: &'a str,
    pub image_url: Option<&'a str>,
    pub sizes: &'a [SizeOption],
    pub finish_options: &'a [FinishOption],
}

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) base_price: String,
    pub(crate) media_type: String,
    pub(crate) category: String,
    pub(crate) image_url: Option<String>,
    pub(crate) featured: bool,
    pub(crate) status: String,
    pub(crate) sizes: String,
    pub(crate) finish_options: String,
    pub(crate) created_at: DateTime<Utc>,
}

const PRODUCT_COLUMNS: &str = "id, title, description, base_price, media_type, category, \
     image_url, featured, status, sizes, finish_options, created_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a catalog entry. New products start active and unfeatured.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: NewProduct<'_>) -> Result<Product, RepositoryError> {
        let created_at = Utc::now();
        let sizes_json = serde_json::to_string(product.sizes)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let finishes_json = serde_json::to_string(product.finish_options)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let result = sqlx::query(
            r"
            INSERT INTO products
                (title, description, base_price, media_type, category,
                 image_url, featured, status, sizes, finish_options, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(product.title)
        .bind(product.description)
        .bind(product.base_price.to_string())
        .bind(product.media_type)
        .bind(product.category)
        .bind(product.image_url)
        .bind(false)
        .bind(ProductStatus::Active.to_string())
        .bind(sizes_json)
        .bind(finishes_json)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        Ok(Product {
            id: ProductId::new(result.last_insert_rowid()),
            title: product.title.to_owned(),
            description: product.description.map(ToOwned::to_owned),
            base_price: product.base_price,
            media_type: product.media_type.to_owned(),
            category: product.category.to_owned(),
            image_url: product.image_url.map(ToOwned::to_owned),
            featured: false,
            status: ProductStatus::Active,
            sizes: product.sizes.to_vec(),
            finish_options: product.finish_options.to_vec(),
            created_at,
        })
    }

    /// List active products, newest first, optionally narrowed to one
    /// category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn list_active(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE status = 'active' AND (? IS NULL OR category = ?)
            ORDER BY created_at DESC, id DESC
            ",
        );
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(category)
            .bind(category)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(row_to_product).collect()
    }

    /// Find the active product carrying a given media type tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn find_active_by_media_type(
        &self,
        media_type: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE media_type = ? AND status = 'active'
            ",
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(media_type)
            .fetch_optional(self.pool)
            .await?;

        row.map(row_to_product).transpose()
    }

    /// Get a product by its ID, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = ?
            ",
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(row_to_product).transpose()
    }

    /// Check whether any product carries the given media type tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn media_type_exists(&self, media_type: &str) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE media_type = ?)")
                .bind(media_type)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }
}

pub(crate) fn row_to_product(row: ProductRow) -> Result<Product, RepositoryError> {
    let base_price = Decimal::from_str(&row.base_price).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
    })?;
    let status = ProductStatus::from_str(&row.status).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid product status in database: {e}"))
    })?;
    let sizes: Vec<SizeOption> = serde_json::from_str(&row.sizes).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid size options in database: {e}"))
    })?;
    let finish_options: Vec<FinishOption> =
        serde_json::from_str(&row.finish_options).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid finish options in database: {e}"))
        })?;

    Ok(Product {
        id: ProductId::new(row.id),
        title: row.title,
        description: row.description,
        base_price,
        media_type: row.media_type,
        category: row.category,
        image_url: row.image_url,
        featured: row.featured,
        status,
        sizes,
        finish_options,
        created_at: row.created_at,
    })
}
