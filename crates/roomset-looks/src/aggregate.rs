//! Turns resolved hotspots into a look's shopping list.

use std::collections::HashMap;

use roomset_core::{ImageSpot, LookProduct};

/// Distinct products pinned across all of a look's spots, with how many
/// spots pin each one, in first-encountered order.
///
/// Spots without a product id, or whose product did not resolve, are
/// skipped.
#[must_use]
pub fn unique_products(spots: &[ImageSpot]) -> Vec<LookProduct> {
    let mut out: Vec<LookProduct> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for spot in spots {
        let (Some(product_id), Some(product)) = (spot.product_id.as_deref(), spot.product.as_ref())
        else {
            continue;
        };
        match index.get(product_id) {
            Some(&at) => out[at].count = out[at].count.saturating_add(1),
            None => {
                index.insert(product_id, out.len());
                out.push(LookProduct {
                    product: product.clone(),
                    count: 1,
                });
            }
        }
    }

    out
}

/// Sum of normalized unit price times count. Garbled prices count as 0.
#[must_use]
pub fn total_price(products: &[LookProduct]) -> f64 {
    products.iter().map(LookProduct::line_total).sum()
}
