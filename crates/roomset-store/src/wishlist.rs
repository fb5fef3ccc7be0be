//! The wishlist.

use chrono::Utc;
use roomset_core::{LineItem, LineType, NewLineItem};
use uuid::Uuid;

use crate::error::StoreError;
use crate::ledger::{AddOutcome, Ledger, LineStore};
use crate::storage::Storage;

/// Saved lines, at most one per type and foreign key. Re-adding an existing
/// entry is a no-op regardless of color.
pub struct WishlistStore {
    ledger: Ledger,
}

impl WishlistStore {
    /// Opens the wishlist, loading whatever `storage` holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage cannot be read.
    pub fn open(storage: impl Storage + 'static) -> Result<Self, StoreError> {
        Ok(Self {
            ledger: Ledger::open(Box::new(storage), "wishlist")?,
        })
    }

    /// Presence check that also compares the selected color name. `None`
    /// only matches lines saved without a color.
    #[must_use]
    pub fn is_present_with_color(
        &self,
        foreign_key: &str,
        line_type: LineType,
        color_name: Option<&str>,
    ) -> bool {
        self.ledger.items().iter().any(|item| {
            item.kind.matches(foreign_key, line_type)
                && item.selected_color.as_ref().map(|c| c.name.as_str()) == color_name
        })
    }

    /// Number of saved lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        u32::try_from(self.ledger.items().len()).unwrap_or(u32::MAX)
    }

    /// Empties the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the empty record cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.ledger.commit(Vec::new(), 0)
    }

    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), StoreError> {
        let count = u32::try_from(next.len()).unwrap_or(u32::MAX);
        self.ledger.commit(next, count)
    }
}

impl LineStore for WishlistStore {
    fn add(&mut self, item: NewLineItem) -> Result<AddOutcome, StoreError> {
        if let Some(existing) = self
            .ledger
            .items()
            .iter()
            .find(|line| line.kind == item.kind)
        {
            tracing::debug!(
                line_type = %item.kind.line_type(),
                key = item.kind.foreign_key(),
                "already in wishlist"
            );
            return Ok(AddOutcome::Rejected(existing.id));
        }

        let id = Uuid::new_v4();
        let mut next = self.ledger.draft();
        next.push(item.into_line_item(id, Utc::now()));
        self.commit(next)?;
        Ok(AddOutcome::Inserted(id))
    }

    fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(idx) = self.ledger.position(id) else {
            return Ok(false);
        };
        let mut next = self.ledger.draft();
        next.remove(idx);
        self.commit(next)?;
        Ok(true)
    }

    fn update_quantity(&mut self, id: Uuid, quantity: u32) -> Result<bool, StoreError> {
        if quantity == 0 {
            return self.remove(id);
        }
        let Some(idx) = self.ledger.position(id) else {
            return Ok(false);
        };
        let mut next = self.ledger.draft();
        next[idx].quantity = quantity;
        self.commit(next)?;
        Ok(true)
    }

    fn items(&self) -> &[LineItem] {
        self.ledger.items()
    }
}
