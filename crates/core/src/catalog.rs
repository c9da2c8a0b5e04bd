//! Size and finish option schemas for configurable products.
//!
//! A product embeds a list of size options and a list of finish options;
//! option ids are unique within a product. Pricing of a size option is an
//! explicit tagged variant: a flat add-on, or a per-square-foot rate that
//! requires customer-supplied dimensions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a size option contributes to the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizePricing {
    /// Flat add-on for a fixed dimension choice.
    Flat {
        /// Amount added to the total, in the catalog currency.
        amount: Decimal,
    },
    /// Per-square-foot rate for customer-specified dimensions.
    PerArea {
        /// Rate per square foot, in the catalog currency.
        rate: Decimal,
    },
}

impl SizePricing {
    /// Whether this pricing requires customer-supplied dimensions.
    #[must_use]
    pub const fn needs_dimensions(&self) -> bool {
        matches!(self, Self::PerArea { .. })
    }
}

/// A named dimensional choice for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    /// Identifier, unique within the product.
    pub id: String,
    /// Display name, e.g. `2' x 4'`.
    pub name: String,
    /// How this option prices out.
    pub pricing: SizePricing,
}

/// A named production/finishing choice carrying a flat price add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishOption {
    /// Identifier, unique within the product.
    pub id: String,
    /// Display name, e.g. `Grommets`.
    pub name: String,
    /// Flat add-on; zero means the finish is free.
    pub price: Decimal,
}

/// Returns the first id that appears more than once, if any.
///
/// Used to enforce the per-product uniqueness invariant on size and finish
/// option ids at creation time.
pub fn first_duplicate_id<'a, I>(ids: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            return Some(id);
        }
        seen.push(id);
    }
    None
}
