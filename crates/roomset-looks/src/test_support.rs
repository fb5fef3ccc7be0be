//! In-memory look fixtures shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use roomset_client::ClientError;
use roomset_core::{DesignLook, DesignLookImage, ImageSpot, Product};

use crate::source::LookSource;

pub(crate) fn product(id: &str, price: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Product {id}"),
        "designer": "Mira Sol",
        "color": "Oak, Walnut",
        "image": format!("https://cdn.example.com/{id}.jpg"),
        "price": price,
    }))
    .expect("fixture product should deserialize")
}

pub(crate) fn image(id: &str, order: i32) -> DesignLookImage {
    DesignLookImage {
        id: id.to_owned(),
        design_look_id: None,
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        label: None,
        order,
    }
}

pub(crate) fn spot(id: &str, image_id: &str, product_id: Option<&str>) -> ImageSpot {
    ImageSpot {
        id: id.to_owned(),
        image_id: Some(image_id.to_owned()),
        x_percent: 50.0,
        y_percent: 50.0,
        product_id: product_id.map(str::to_owned),
        product: None,
    }
}

pub(crate) fn look(id: &str, designer_id: Option<&str>) -> DesignLook {
    DesignLook {
        id: id.to_owned(),
        designer_id: designer_id.map(str::to_owned),
        title: "Calm Loft".to_owned(),
        description: None,
        style: Some("Japandi".to_owned()),
        room_type: Some("living-room".to_owned()),
        tags: Vec::new(),
    }
}

fn not_found(what: String) -> ClientError {
    ClientError::NotFound { url: what }
}

/// A scripted storefront. Looks listed in `failing` error on the image
/// fetch; looks listed in `stalled` never finish loading. With
/// `products_down` every product batch errors.
#[derive(Default)]
pub(crate) struct FakeSource {
    images: HashMap<String, Vec<DesignLookImage>>,
    spots: HashMap<(String, String), Vec<ImageSpot>>,
    products: Vec<Product>,
    failing: HashSet<String>,
    stalled: HashSet<String>,
    products_down: bool,
    pub(crate) image_fetches: AtomicUsize,
    pub(crate) product_batches: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
}

impl FakeSource {
    pub(crate) fn with_images(mut self, look_id: &str, images: Vec<DesignLookImage>) -> Self {
        self.images.insert(look_id.to_owned(), images);
        self
    }

    pub(crate) fn with_spots(mut self, look_id: &str, image_id: &str, spots: Vec<ImageSpot>) -> Self {
        self.spots
            .insert((look_id.to_owned(), image_id.to_owned()), spots);
        self
    }

    pub(crate) fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products.extend(products);
        self
    }

    pub(crate) fn failing(mut self, look_id: &str) -> Self {
        self.failing.insert(look_id.to_owned());
        self
    }

    pub(crate) fn stalled(mut self, look_id: &str) -> Self {
        self.stalled.insert(look_id.to_owned());
        self
    }

    pub(crate) fn failing_products(mut self) -> Self {
        self.products_down = true;
        self
    }

    /// A single-image look whose spots pin the given product ids.
    pub(crate) fn with_simple_look(self, look_id: &str, product_ids: &[&str]) -> Self {
        let image_id = format!("{look_id}-img");
        let spots = product_ids
            .iter()
            .enumerate()
            .map(|(i, pid)| spot(&format!("{look_id}-s{i}"), &image_id, Some(pid)))
            .collect();
        self.with_images(look_id, vec![image(&image_id, 1)])
            .with_spots(look_id, &image_id, spots)
    }

    pub(crate) fn requested_ids(&self) -> Vec<Vec<String>> {
        self.requested.lock().expect("fixture lock").clone()
    }
}

impl LookSource for FakeSource {
    async fn look_images(&self, look_id: &str) -> Result<Vec<DesignLookImage>, ClientError> {
        self.image_fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.stalled.contains(look_id) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(look_id) {
            return Err(ClientError::Api {
                context: format!("design-looks/{look_id}/images"),
                message: "look not published".to_owned(),
            });
        }
        self.images
            .get(look_id)
            .cloned()
            .ok_or_else(|| not_found(format!("design-looks/{look_id}/images")))
    }

    async fn image_spots(&self, look_id: &str, image_id: &str) -> Result<Vec<ImageSpot>, ClientError> {
        self.spots
            .get(&(look_id.to_owned(), image_id.to_owned()))
            .cloned()
            .ok_or_else(|| not_found(format!("design-looks/{look_id}/spots/{image_id}")))
    }

    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ClientError> {
        self.product_batches.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("fixture lock")
            .push(ids.to_vec());
        if self.products_down {
            return Err(ClientError::UnexpectedStatus {
                status: 503,
                url: "products/batch".to_owned(),
            });
        }
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
