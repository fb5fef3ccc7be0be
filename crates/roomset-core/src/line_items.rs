//! Cart and wishlist line items.
//!
//! A line item points at exactly one purchasable thing. [`LineKind`] carries
//! the discriminant together with the matching foreign key, so an item can
//! never reference a product and a design look at the same time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::colors::Color;

/// What a line item refers to, serialized as `{"type": "...", "<key>": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum LineKind {
    Product { product_id: String },
    RoomStyle { room_style_id: String },
    /// One product bought as part of a designer collection. Never shares a
    /// line with a plain `Product` entry for the same product.
    DesignerCollection {
        designer_collection_id: String,
        product_id: String,
    },
    DesignLook { look_id: String },
}

/// The bare discriminant of a [`LineKind`], for presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    Product,
    RoomStyle,
    DesignerCollection,
    DesignLook,
}

impl LineKind {
    #[must_use]
    pub fn line_type(&self) -> LineType {
        match self {
            LineKind::Product { .. } => LineType::Product,
            LineKind::RoomStyle { .. } => LineType::RoomStyle,
            LineKind::DesignerCollection { .. } => LineType::DesignerCollection,
            LineKind::DesignLook { .. } => LineType::DesignLook,
        }
    }

    /// The type-specific foreign key.
    #[must_use]
    pub fn foreign_key(&self) -> &str {
        match self {
            LineKind::Product { product_id } => product_id,
            LineKind::RoomStyle { room_style_id } => room_style_id,
            LineKind::DesignerCollection {
                designer_collection_id,
                ..
            } => designer_collection_id,
            LineKind::DesignLook { look_id } => look_id,
        }
    }

    /// The product a line resolves to, for kinds that carry one.
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        match self {
            LineKind::Product { product_id } | LineKind::DesignerCollection { product_id, .. } => {
                Some(product_id)
            }
            LineKind::RoomStyle { .. } | LineKind::DesignLook { .. } => None,
        }
    }

    #[must_use]
    pub fn matches(&self, foreign_key: &str, line_type: LineType) -> bool {
        self.line_type() == line_type && self.foreign_key() == foreign_key
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineType::Product => write!(f, "product"),
            LineType::RoomStyle => write!(f, "room-style"),
            LineType::DesignerCollection => write!(f, "designer-collection"),
            LineType::DesignLook => write!(f, "design-look"),
        }
    }
}

/// Where a line item came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSource {
    /// Added directly from a catalog page.
    #[default]
    Catalog,
    /// Added from a designer's look or collection.
    Designer,
}

/// Attribution of a line item to a designer's look.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(default)]
    pub source: LineSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_designer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

impl Provenance {
    /// Provenance for items pulled out of a designer look.
    #[must_use]
    pub fn designer(designer_id: Option<String>) -> Self {
        Self {
            source: LineSource::Designer,
            source_designer_id: designer_id,
            collection_name: None,
            collection_id: None,
        }
    }

    /// Designer provenance that also names the look as a purchasable collection.
    #[must_use]
    pub fn designer_collection(
        designer_id: Option<String>,
        collection_name: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            source: LineSource::Designer,
            source_designer_id: designer_id,
            collection_name: Some(collection_name.into()),
            collection_id: Some(collection_id.into()),
        }
    }
}

/// A line item the caller wants to add; the store assigns `id` and `added_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub kind: LineKind,
    pub name: String,
    pub designer: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub image: Option<String>,
    pub quantity: u32,
    pub selected_color: Option<Color>,
    pub provenance: Provenance,
}

impl NewLineItem {
    /// Whether `existing` is the same cart line: same type, same foreign key,
    /// same selected color name.
    #[must_use]
    pub fn same_line_as(&self, existing: &LineItem) -> bool {
        self.kind == existing.kind
            && self.selected_color.as_ref().map(|c| c.name.as_str())
                == existing.selected_color.as_ref().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn into_line_item(self, id: Uuid, added_at: DateTime<Utc>) -> LineItem {
        LineItem {
            id,
            kind: self.kind,
            name: self.name,
            designer: self.designer,
            price: self.price,
            original_price: self.original_price,
            image: self.image,
            quantity: self.quantity,
            selected_color: self.selected_color,
            provenance: self.provenance,
            added_at,
        }
    }
}

/// A persisted cart or wishlist line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: LineKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<Color>,
    #[serde(flatten)]
    pub provenance: Provenance,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
