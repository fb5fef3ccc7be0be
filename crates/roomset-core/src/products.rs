use serde::{Deserialize, Serialize};

use crate::colors::{split_colors, Color};
use crate::ids;
use crate::pricing::{compute_discount, normalize_price, Discount, RawPrice, DEFAULT_VAT_PERCENT};

/// A catalog product as served by the storefront API.
///
/// Pricing fields are kept in their raw wire form; use the accessor methods
/// to read normalized numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Free text, possibly a comma-joined list of finishes.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "stockQuantity")]
    pub stock_quantity: Option<i64>,
    #[serde(default, alias = "imageUrl", alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub price: RawPrice,
    /// Pre-VAT list price.
    #[serde(default, alias = "retailPrice")]
    pub retail_price: RawPrice,
    #[serde(default, alias = "vatPercent", alias = "vat")]
    pub vat_percent: RawPrice,
    #[serde(default, alias = "discountPercent", alias = "discount")]
    pub discount_percent: RawPrice,
}

impl Product {
    /// Current selling price, `0.0` when absent or garbled.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        normalize_price(&self.price)
    }

    #[must_use]
    pub fn retail_price(&self) -> f64 {
        normalize_price(&self.retail_price)
    }

    /// VAT percentage, [`DEFAULT_VAT_PERCENT`] when the product carries none.
    #[must_use]
    pub fn vat_percent(&self) -> f64 {
        if self.vat_percent.is_unspecified() {
            DEFAULT_VAT_PERCENT
        } else {
            normalize_price(&self.vat_percent)
        }
    }

    #[must_use]
    pub fn discount_percent(&self) -> f64 {
        normalize_price(&self.discount_percent)
    }

    #[must_use]
    pub fn discount(&self) -> Discount {
        compute_discount(
            self.unit_price(),
            self.retail_price(),
            self.vat_percent(),
            self.discount_percent(),
        )
    }

    /// Every finish named in the `color` field, in listing order.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        self.color.as_deref().map(split_colors).unwrap_or_default()
    }

    /// The first listed finish, or [`Color::unspecified`].
    #[must_use]
    pub fn default_color(&self) -> Color {
        self.colors()
            .into_iter()
            .next()
            .unwrap_or_else(Color::unspecified)
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity.is_none_or(|q| q > 0)
    }
}
