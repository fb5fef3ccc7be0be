//! Async client for the storefront REST API.
//!
//! Every endpoint goes through one envelope adapter ([`envelope`]) so callers
//! only ever see canonical domain types from `roomset-core`, whichever of
//! the backend's response shapes the endpoint happens to use.

pub mod client;
pub mod envelope;
pub mod error;
pub mod rate_limit;
pub mod types;

pub use client::StorefrontClient;
pub use error::ClientError;
pub use types::{CategoryListing, LookQuery, ProductSearch};
