//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use signcraft_core::{FinishOption, ProductId, ProductStatus, SizeOption};

/// A sellable catalog entry (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Base price in the catalog currency. Informational on the wire: the
    /// pricing engine works from the size/finish contributions alone.
    #[serde(rename = "price")]
    pub base_price: Decimal,
    /// Category tag orders are keyed on, e.g. `vinyl-banner`.
    pub media_type: String,
    /// Display category for browsing, e.g. `banners`.
    pub category: String,
    /// Product image reference.
    pub image_url: Option<String>,
    /// Whether the product is featured on the home page.
    pub featured: bool,
    /// Catalog status; only `active` products are listed and orderable.
    pub status: ProductStatus,
    /// Size options; ids unique within the product.
    pub sizes: Vec<SizeOption>,
    /// Finish options; ids unique within the product.
    pub finish_options: Vec<FinishOption>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Look up a size option by id.
    #[must_use]
    pub fn size_option(&self, id: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.id == id)
    }

    /// Look up a finish option by id.
    #[must_use]
    pub fn finish_option(&self, id: &str) -> Option<&FinishOption> {
        self.finish_options.iter().find(|f| f.id == id)
    }
}
