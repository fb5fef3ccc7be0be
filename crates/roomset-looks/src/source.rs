//! The three look endpoints resolution depends on, behind a trait so the
//! engine can run against the live storefront or an in-memory fixture.

use std::future::Future;

use roomset_client::{ClientError, StorefrontClient};
use roomset_core::{DesignLookImage, ImageSpot, Product};

pub trait LookSource: Sync {
    /// A look's images in display order.
    fn look_images(
        &self,
        look_id: &str,
    ) -> impl Future<Output = Result<Vec<DesignLookImage>, ClientError>> + Send;

    /// Hotspots of one image, without products attached.
    fn image_spots(
        &self,
        look_id: &str,
        image_id: &str,
    ) -> impl Future<Output = Result<Vec<ImageSpot>, ClientError>> + Send;

    /// Batch product lookup. Ids with no matching product are simply absent
    /// from the result.
    fn products_by_ids(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;
}

impl LookSource for StorefrontClient {
    async fn look_images(&self, look_id: &str) -> Result<Vec<DesignLookImage>, ClientError> {
        StorefrontClient::look_images(self, look_id).await
    }

    async fn image_spots(
        &self,
        look_id: &str,
        image_id: &str,
    ) -> Result<Vec<ImageSpot>, ClientError> {
        StorefrontClient::image_spots(self, look_id, image_id).await
    }

    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ClientError> {
        StorefrontClient::products_by_ids(self, ids).await
    }
}
