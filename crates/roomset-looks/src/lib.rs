//! Design-look engine: resolves a look's images, hotspots and products,
//! aggregates them into a shopping list, tracks per-look load state, and
//! turns a look into cart or wishlist lines.

pub mod aggregate;
pub mod cache;
pub mod carousel;
pub mod error;
pub mod materialize;
pub mod resolve;
pub mod source;

#[cfg(test)]
mod test_support;

pub use aggregate::{total_price, unique_products};
pub use cache::{EnsureOutcome, LoadSummary, LookCache, LookState};
pub use carousel::ImageCarousel;
pub use error::ResolveError;
pub use materialize::{
    add_complete_room_to_cart, toggle_all_in_wishlist, AddedLooks, Framing, MaterializeOutcome,
    WishlistToggle,
};
pub use resolve::{resolve_look, ResolvedLook};
pub use source::LookSource;
