//! Pure price computation from a customer's selections.
//!
//! Given a size option, a finish option, and (for per-area sizes) custom
//! dimensions, [`quote`] deterministically computes the total charge. No
//! hidden state, no I/O; safe to call repeatedly and concurrently.
//!
//! The total is the size contribution plus the finish contribution. Flat
//! size prices already embed the product base price, so nothing else is
//! added. Arithmetic runs unrounded in [`Decimal`]; the result is rounded
//! to two decimals exactly once, at the end.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{FinishOption, SizeOption, SizePricing};

/// Decimal places carried by a quoted price.
pub const PRICE_SCALE: u32 = 2;

/// Errors from an invalid pricing configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A per-area size was selected without dimensions.
    #[error("size '{0}' is priced per square foot and requires width and height")]
    MissingDimensions(String),
    /// Width is zero, negative, or absent.
    #[error("width must be a positive number")]
    NonPositiveWidth,
    /// Height is zero, negative, or absent.
    #[error("height must be a positive number")]
    NonPositiveHeight,
}

/// Customer-supplied dimensions in feet.
///
/// Construction does not validate; validation happens only when a per-area
/// size actually consults the dimensions, so stale dimensions left over
/// after switching to a flat size have zero residual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Decimal,
    pub height: Decimal,
}

impl Dimensions {
    /// Create dimensions from raw width and height.
    #[must_use]
    pub const fn new(width: Decimal, height: Decimal) -> Self {
        Self { width, height }
    }

    /// Area in square feet.
    #[must_use]
    pub fn area(&self) -> Decimal {
        self.width * self.height
    }

    fn validate(&self) -> Result<(), PricingError> {
        if self.width <= Decimal::ZERO {
            return Err(PricingError::NonPositiveWidth);
        }
        if self.height <= Decimal::ZERO {
            return Err(PricingError::NonPositiveHeight);
        }
        Ok(())
    }
}

/// Price contribution of the selected size, unrounded.
///
/// Flat sizes ignore `dimensions` entirely. Per-area sizes require positive
/// dimensions and contribute `width * height * rate`.
///
/// # Errors
///
/// Returns a [`PricingError`] when a per-area size is selected with missing
/// or non-positive dimensions.
pub fn size_contribution(
    size: &SizeOption,
    dimensions: Option<Dimensions>,
) -> Result<Decimal, PricingError> {
    match size.pricing {
        SizePricing::Flat { amount } => Ok(amount),
        SizePricing::PerArea { rate } => {
            let dims = dimensions
                .ok_or_else(|| PricingError::MissingDimensions(size.id.clone()))?;
            dims.validate()?;
            Ok(dims.area() * rate)
        }
    }
}

/// Total charge for a size/finish selection, rounded to two decimals.
///
/// # Errors
///
/// Returns a [`PricingError`] when a per-area size is selected with missing
/// or non-positive dimensions.
pub fn quote(
    size: &SizeOption,
    finish: &FinishOption,
    dimensions: Option<Dimensions>,
) -> Result<Decimal, PricingError> {
    let total = size_contribution(size, dimensions)? + finish.price;
    Ok(total.round_dp(PRICE_SCALE))
}
