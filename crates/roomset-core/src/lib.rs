//! Domain types shared by every roomset crate: catalog products, design
//! looks and their hotspots, cart/wishlist line items, price and color
//! normalization, and environment-driven configuration.

pub mod app_config;
pub mod colors;
pub mod config;
pub mod error;
pub mod ids;
pub mod line_items;
pub mod looks;
pub mod pricing;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use colors::{resolve_color, split_colors, Color, FALLBACK_HEX};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use line_items::{LineItem, LineKind, LineSource, LineType, NewLineItem, Provenance};
pub use looks::{Designer, DesignLook, DesignLookImage, ImageSpot, LookFilters, LookProduct};
pub use pricing::{compute_discount, format_price, normalize_price, Discount, RawPrice};
pub use products::Product;
