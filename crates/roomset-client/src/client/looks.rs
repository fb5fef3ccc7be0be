//! Design-look endpoints under `/api/public/design-looks`.

use reqwest::Url;
use roomset_core::{DesignLook, DesignLookImage, ImageSpot, LookFilters, Product};

use crate::envelope::{decode_list, decode_one};
use crate::error::ClientError;
use crate::types::LookQuery;

use super::StorefrontClient;

const LOOKS_BASE: [&str; 3] = ["api", "public", "design-looks"];

impl StorefrontClient {
    /// Lists design looks, optionally narrowed by style, room type and designer.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn list_looks(&self, query: &LookQuery) -> Result<Vec<DesignLook>, ClientError> {
        let url = self.looks_url(&[], &query.query_pairs())?;
        let body = self.get_json(&url, "design-looks").await?;
        decode_list(body, "design-looks")
    }

    /// Fetches the facets offered by the look listing page.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn look_filters(&self) -> Result<LookFilters, ClientError> {
        let url = self.looks_url(&["filters"], &[])?;
        let body = self.get_json(&url, "design-looks/filters").await?;
        Ok(decode_one(body, "design-looks/filters")?.unwrap_or_default())
    }

    /// Fetches a look's images sorted by display order.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn look_images(&self, look_id: &str) -> Result<Vec<DesignLookImage>, ClientError> {
        let context = format!("design-looks/{look_id}/images");
        let url = self.looks_url(&[look_id, "images"], &[])?;
        let body = self.get_json(&url, &context).await?;
        let mut images: Vec<DesignLookImage> = decode_list(body, &context)?;
        images.sort_by_key(|image| image.order);
        Ok(images)
    }

    /// Fetches the hotspots of one look image. Spots come back with no
    /// `product` attached.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn image_spots(
        &self,
        look_id: &str,
        image_id: &str,
    ) -> Result<Vec<ImageSpot>, ClientError> {
        let context = format!("design-looks/{look_id}/spots/{image_id}");
        let url = self.looks_url(&[look_id, "spots", image_id], &[])?;
        let body = self.get_json(&url, &context).await?;
        let mut spots: Vec<ImageSpot> = decode_list(body, &context)?;
        for spot in &mut spots {
            if spot.image_id.is_none() {
                spot.image_id = Some(image_id.to_owned());
            }
            spot.product = None;
        }
        Ok(spots)
    }

    /// Batch-resolves products by id with one request
    /// (`?product_ids=a&product_ids=b`). An empty id list skips the request.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and envelope errors.
    pub async fn products_by_ids(&self, product_ids: &[String]) -> Result<Vec<Product>, ClientError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, &str)> = product_ids
            .iter()
            .map(|id| ("product_ids", id.as_str()))
            .collect();
        let url = self.looks_url(&["products"], &query)?;
        let body = self.get_json(&url, "design-looks/products").await?;
        decode_list(body, "design-looks/products")
    }

    fn looks_url(&self, tail: &[&str], query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut segments: Vec<&str> = LOOKS_BASE.to_vec();
        segments.extend_from_slice(tail);
        self.build_url(&segments, query)
    }
}
