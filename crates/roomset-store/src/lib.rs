//! Durable client-side cart and wishlist stores.
//!
//! Both stores load their record once when opened and write it back after
//! every mutation. All writes go through the [`LineStore`] operations, which
//! is where the de-duplication rules live: the cart merges quantities of an
//! identical line, the wishlist refuses duplicates.

pub mod cart;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod wishlist;

pub use cart::CartStore;
pub use error::StoreError;
pub use ledger::{AddOutcome, LineStore, PersistedRecord};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use wishlist::WishlistStore;
