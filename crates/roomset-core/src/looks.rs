//! Designer room looks: staged photos with product hotspots.

use serde::{Deserialize, Serialize};

use crate::ids;
use crate::products::Product;

/// A designer-curated room look, as listed by the API (images and spots
/// are fetched separately).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignLook {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "designerId",
        deserialize_with = "ids::opt_string_or_number"
    )]
    pub designer_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, alias = "roomType")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One photographed staging of a look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignLookImage {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "designLookId",
        deserialize_with = "ids::opt_string_or_number"
    )]
    pub design_look_id: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Display sequence within the look.
    #[serde(default)]
    pub order: i32,
}

/// A hotspot on a look image.
///
/// Positions are percentages of the image box so they survive resizing.
/// A spot without `product_id` is a decorative marker, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpot {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "imageId",
        deserialize_with = "ids::opt_string_or_number"
    )]
    pub image_id: Option<String>,
    #[serde(default, alias = "xPercent")]
    pub x_percent: f64,
    #[serde(default, alias = "yPercent")]
    pub y_percent: f64,
    #[serde(
        default,
        alias = "productId",
        deserialize_with = "ids::opt_string_or_number"
    )]
    pub product_id: Option<String>,
    /// Filled in by resolution; never present on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl ImageSpot {
    /// `true` once the spot's product reference matched a fetched product.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.product_id.is_some() && self.product.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designer {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Facets offered by the look listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookFilters {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default, alias = "roomTypes")]
    pub room_types: Vec<String>,
    #[serde(default)]
    pub designers: Vec<Designer>,
}

/// A product appearing in a look, with the number of spots pinning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookProduct {
    pub product: Product,
    pub count: u32,
}

impl LookProduct {
    /// Normalized unit price times occurrence count.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.unit_price() * f64::from(self.count)
    }
}
