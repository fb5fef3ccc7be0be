//! Catalog browsing endpoints: category listings, filtered search and
//! single product detail.

use roomset_core::Product;

use crate::envelope::{decode_list, decode_one};
use crate::error::ClientError;
use crate::types::{CategoryListing, ProductSearch};

use super::StorefrontClient;

impl StorefrontClient {
    /// Lists the products of a category page.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn category_products(
        &self,
        listing: &CategoryListing,
    ) -> Result<Vec<Product>, ClientError> {
        let segments = listing.path_segments();
        let context = segments.join("/");
        let url = self.build_url(&segments, &[])?;
        let body = self.get_json(&url, &context).await?;
        decode_list(body, &context)
    }

    /// Lists products filtered by category (`s_c`) and subcategory (`s_s_c`).
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn search_products(&self, search: &ProductSearch) -> Result<Vec<Product>, ClientError> {
        let url = self.build_url(&["api", "products"], &search.query_pairs())?;
        let body = self.get_json(&url, "products").await?;
        decode_list(body, "products")
    }

    /// Fetches one product. A 404 or an empty payload is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates transport, non-404 status and envelope errors.
    pub async fn product(&self, product_id: &str) -> Result<Option<Product>, ClientError> {
        let context = format!("product(id={product_id})");
        let url = self.build_url(&["api", "product"], &[("id", product_id)])?;
        match self.get_json(&url, &context).await {
            Ok(body) => decode_one(body, &context),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
