//! Spot resolution: images, then every image's spots, then one batched
//! product lookup for everything the spots reference.

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use roomset_core::{DesignLookImage, ImageSpot, LookProduct, Product};

use crate::aggregate::{total_price, unique_products};
use crate::error::ResolveError;
use crate::source::LookSource;

/// A look with its images and product-attached spots.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLook {
    pub look_id: String,
    pub images: Vec<DesignLookImage>,
    /// Spots of every image, grouped in image order.
    pub spots: Vec<ImageSpot>,
}

impl ResolvedLook {
    #[must_use]
    pub fn empty(look_id: impl Into<String>) -> Self {
        Self {
            look_id: look_id.into(),
            images: Vec::new(),
            spots: Vec::new(),
        }
    }

    #[must_use]
    pub fn unique_products(&self) -> Vec<LookProduct> {
        unique_products(&self.spots)
    }

    #[must_use]
    pub fn total_price(&self) -> f64 {
        total_price(&self.unique_products())
    }

    /// Spots placed on one image.
    pub fn spots_for_image<'a>(&'a self, image_id: &'a str) -> impl Iterator<Item = &'a ImageSpot> {
        self.spots
            .iter()
            .filter(move |spot| spot.image_id.as_deref() == Some(image_id))
    }
}

/// Fetches and links everything needed to render and buy a look.
///
/// Spot lists for all images are fetched concurrently. The product batch is
/// issued only after every spot list is in, and is skipped entirely when no
/// spot references a product. Spots whose product id is missing from the
/// batch response stay unresolved.
///
/// # Errors
///
/// Returns [`ResolveError`] naming the step that failed.
pub async fn resolve_look<S: LookSource>(
    source: &S,
    look_id: &str,
) -> Result<ResolvedLook, ResolveError> {
    let images = source
        .look_images(look_id)
        .await
        .map_err(|e| ResolveError::Images {
            look_id: look_id.to_owned(),
            source: e,
        })?;

    let per_image = try_join_all(images.iter().map(|image| async move {
        source
            .image_spots(look_id, &image.id)
            .await
            .map_err(|e| ResolveError::Spots {
                look_id: look_id.to_owned(),
                image_id: image.id.clone(),
                source: e,
            })
    }))
    .await?;
    let mut spots: Vec<ImageSpot> = per_image.into_iter().flatten().collect();

    let product_ids = distinct_product_ids(&spots);
    if product_ids.is_empty() {
        tracing::debug!(look_id, spots = spots.len(), "look references no products");
        return Ok(ResolvedLook {
            look_id: look_id.to_owned(),
            images,
            spots,
        });
    }

    let products = source
        .products_by_ids(&product_ids)
        .await
        .map_err(|e| ResolveError::Products {
            look_id: look_id.to_owned(),
            source: e,
        })?;
    attach_products(look_id, &mut spots, products);

    Ok(ResolvedLook {
        look_id: look_id.to_owned(),
        images,
        spots,
    })
}

fn distinct_product_ids(spots: &[ImageSpot]) -> Vec<String> {
    let mut seen = HashSet::new();
    spots
        .iter()
        .filter_map(|spot| spot.product_id.as_deref())
        .filter(|id| seen.insert(*id))
        .map(str::to_owned)
        .collect()
}

fn attach_products(look_id: &str, spots: &mut [ImageSpot], products: Vec<Product>) {
    let by_id: HashMap<String, Product> = products
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect();

    for spot in spots.iter_mut() {
        let Some(product_id) = spot.product_id.as_deref() else {
            continue;
        };
        spot.product = by_id.get(product_id).cloned();
        if spot.product.is_none() {
            tracing::debug!(look_id, spot_id = %spot.id, product_id, "spot product not returned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{image, product, spot, FakeSource};
    use roomset_client::ClientError;
    use std::sync::atomic::Ordering;

    fn two_image_look() -> FakeSource {
        FakeSource::default()
            .with_images("look-1", vec![image("img-a", 1), image("img-b", 2)])
            .with_spots(
                "look-1",
                "img-a",
                vec![
                    spot("s1", "img-a", Some("p1")),
                    spot("s2", "img-a", Some("p2")),
                ],
            )
            .with_spots(
                "look-1",
                "img-b",
                vec![spot("s3", "img-b", Some("p1")), spot("s4", "img-b", None)],
            )
            .with_products(vec![product("p1", 100.0), product("p2", 50.0)])
    }

    #[tokio::test]
    async fn resolves_images_spots_and_products() {
        let source = two_image_look();
        let look = resolve_look(&source, "look-1").await.unwrap();

        assert_eq!(look.images.len(), 2);
        assert_eq!(look.spots.len(), 4);
        assert!(look.spots[0].is_resolved());
        assert!(!look.spots[3].is_resolved());
        assert_eq!(look.spots_for_image("img-b").count(), 2);

        let unique = look.unique_products();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].count, 2);
        assert!((look.total_price() - 250.0).abs() < f64::EPSILON);

        assert_eq!(source.product_batches.load(Ordering::SeqCst), 1);
        assert_eq!(
            source.requested_ids(),
            vec![vec!["p1".to_owned(), "p2".to_owned()]]
        );
    }

    #[tokio::test]
    async fn skips_product_fetch_when_no_spot_has_a_product() {
        let source = FakeSource::default()
            .with_images("look-2", vec![image("img-a", 1)])
            .with_spots("look-2", "img-a", vec![spot("s1", "img-a", None)]);

        let look = resolve_look(&source, "look-2").await.unwrap();
        assert_eq!(look.spots.len(), 1);
        assert!(look.unique_products().is_empty());
        assert_eq!(source.product_batches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn look_without_images_is_valid() {
        let source = FakeSource::default().with_images("look-3", Vec::new());
        let look = resolve_look(&source, "look-3").await.unwrap();
        assert_eq!(look, ResolvedLook::empty("look-3"));
    }

    #[tokio::test]
    async fn missing_product_leaves_spot_unresolved() {
        let source = FakeSource::default()
            .with_images("look-4", vec![image("img-a", 1)])
            .with_spots(
                "look-4",
                "img-a",
                vec![
                    spot("s1", "img-a", Some("p1")),
                    spot("s2", "img-a", Some("discontinued")),
                ],
            )
            .with_products(vec![product("p1", 10.0)]);

        let look = resolve_look(&source, "look-4").await.unwrap();
        assert!(look.spots[0].is_resolved());
        assert!(look.spots[1].product.is_none());
        assert_eq!(look.unique_products().len(), 1);
    }

    #[tokio::test]
    async fn image_failure_names_the_step() {
        let source = FakeSource::default().failing("look-5");
        let err = resolve_look(&source, "look-5").await.unwrap_err();
        assert!(matches!(err, ResolveError::Images { ref look_id, .. } if look_id == "look-5"));
    }

    #[tokio::test]
    async fn spot_failure_aborts_the_look() {
        let source = FakeSource::default()
            .with_images("look-6", vec![image("img-a", 1), image("img-b", 2)])
            .with_spots("look-6", "img-a", vec![spot("s1", "img-a", Some("p1"))]);

        let err = resolve_look(&source, "look-6").await.unwrap_err();
        assert!(matches!(err, ResolveError::Spots { ref image_id, .. } if image_id == "img-b"));
        assert_eq!(source.product_batches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn product_batch_failure_aborts_the_look() {
        let source = two_image_look().failing_products();

        let err = resolve_look(&source, "look-1").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Products {
                ref look_id,
                source: ClientError::UnexpectedStatus { status: 503, .. },
            } if look_id == "look-1"
        ));
        assert_eq!(source.product_batches.load(Ordering::SeqCst), 1);
    }
}
