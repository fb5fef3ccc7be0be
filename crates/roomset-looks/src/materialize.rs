//! Turns a look's shopping list into cart or wishlist lines.

use std::collections::HashSet;

use roomset_core::{
    DesignLook, LineItem, LineKind, LineType, LookProduct, NewLineItem, Provenance,
};
use roomset_store::{LineStore, StoreError};

/// How the lines of a room purchase are attributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Products bought individually from a designer's look.
    #[default]
    IndividualProducts,
    /// The look bought as a designer collection: `designer-collection` lines
    /// keyed by look and product, carrying the look title and id.
    DesignerCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeOutcome {
    /// One cart add was issued per unique product.
    Added { lines: usize },
    /// The look had no purchasable products.
    Nothing,
    /// The look was already added earlier in this session.
    AlreadyAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added(usize),
    Removed(usize),
    Nothing,
}

/// Look ids whose room was already put in the cart.
#[derive(Debug, Clone, Default)]
pub struct AddedLooks {
    ids: HashSet<String>,
}

impl AddedLooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the marker set from lines already in a cart: any line bought
    /// as a designer collection marks its look.
    #[must_use]
    pub fn from_lines(lines: &[LineItem]) -> Self {
        Self {
            ids: lines
                .iter()
                .filter_map(|line| line.provenance.collection_id.clone())
                .collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, look_id: &str) -> bool {
        self.ids.contains(look_id)
    }

    fn mark(&mut self, look_id: &str) {
        self.ids.insert(look_id.to_owned());
    }
}

/// Builds the line for one look product.
fn line_for(look: &DesignLook, entry: &LookProduct, quantity: u32, framing: Framing) -> NewLineItem {
    let product = &entry.product;
    let discount = product.discount();
    let (kind, provenance) = match framing {
        Framing::IndividualProducts => (
            LineKind::Product {
                product_id: product.id.clone(),
            },
            Provenance::designer(look.designer_id.clone()),
        ),
        Framing::DesignerCollection => (
            LineKind::DesignerCollection {
                designer_collection_id: look.id.clone(),
                product_id: product.id.clone(),
            },
            Provenance::designer_collection(
                look.designer_id.clone(),
                look.title.clone(),
                look.id.clone(),
            ),
        ),
    };

    NewLineItem {
        kind,
        name: product.name.clone(),
        designer: product.designer.clone(),
        price: product.unit_price(),
        original_price: discount.has_discount.then_some(discount.original_price),
        image: product.image.clone(),
        quantity,
        selected_color: Some(product.default_color()),
        provenance,
    }
}

/// Adds every product of a look to the cart, one add per unique product
/// with its spot count as quantity.
///
/// A look already in `added` is refused. An empty list is a no-op. The look
/// is marked added only when every add succeeded.
///
/// # Errors
///
/// Returns the first [`StoreError`]; adds issued before it stay in the store.
pub fn add_complete_room_to_cart<S: LineStore + ?Sized>(
    store: &mut S,
    look: &DesignLook,
    products: &[LookProduct],
    framing: Framing,
    added: &mut AddedLooks,
) -> Result<MaterializeOutcome, StoreError> {
    if added.contains(&look.id) {
        tracing::debug!(look_id = %look.id, "room already in cart");
        return Ok(MaterializeOutcome::AlreadyAdded);
    }
    if products.is_empty() {
        tracing::warn!(look_id = %look.id, "look has no products to add");
        return Ok(MaterializeOutcome::Nothing);
    }

    for entry in products {
        store.add(line_for(look, entry, entry.count, framing))?;
    }

    added.mark(&look.id);
    tracing::info!(look_id = %look.id, lines = products.len(), "room added to cart");
    Ok(MaterializeOutcome::Added {
        lines: products.len(),
    })
}

/// Wishlists a look's products as a group.
///
/// When every product is already wishlisted, all of them are removed.
/// Otherwise only the missing ones are added and nothing is removed.
/// Presence is by product id alone.
///
/// # Errors
///
/// Returns the first [`StoreError`].
pub fn toggle_all_in_wishlist<S: LineStore + ?Sized>(
    store: &mut S,
    look: &DesignLook,
    products: &[LookProduct],
) -> Result<WishlistToggle, StoreError> {
    if products.is_empty() {
        return Ok(WishlistToggle::Nothing);
    }

    let missing: Vec<&LookProduct> = products
        .iter()
        .filter(|entry| !store.is_present(&entry.product.id, LineType::Product))
        .collect();

    if missing.is_empty() {
        let mut removed = 0;
        for entry in products {
            let ids: Vec<_> = store
                .query(|item| item.kind.matches(&entry.product.id, LineType::Product))
                .into_iter()
                .map(|item| item.id)
                .collect();
            for id in ids {
                if store.remove(id)? {
                    removed += 1;
                }
            }
        }
        tracing::debug!(look_id = %look.id, removed, "look removed from wishlist");
        return Ok(WishlistToggle::Removed(removed));
    }

    for entry in &missing {
        store.add(line_for(look, entry, 1, Framing::IndividualProducts))?;
    }
    tracing::debug!(look_id = %look.id, added = missing.len(), "look added to wishlist");
    Ok(WishlistToggle::Added(missing.len()))
}

#[cfg(test)]
#[path = "materialize_test.rs"]
mod tests;
