//! The shopping cart.

use chrono::Utc;
use roomset_core::{LineItem, NewLineItem};
use uuid::Uuid;

use crate::error::StoreError;
use crate::ledger::{AddOutcome, Ledger, LineStore};
use crate::storage::Storage;

/// Cart lines keyed by type, foreign key and selected color name. Adding an
/// existing combination grows its quantity instead of creating a new line.
pub struct CartStore {
    ledger: Ledger,
}

impl CartStore {
    /// Opens the cart, loading whatever `storage` holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage cannot be read.
    pub fn open(storage: impl Storage + 'static) -> Result<Self, StoreError> {
        Ok(Self {
            ledger: Ledger::open(Box::new(storage), "cart")?,
        })
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        count_units(self.ledger.items())
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.ledger.items().iter().map(LineItem::line_total).sum()
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the empty record cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.ledger.commit(Vec::new(), 0)
    }

    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), StoreError> {
        let count = count_units(&next);
        self.ledger.commit(next, count)
    }
}

fn count_units(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
}

impl LineStore for CartStore {
    fn add(&mut self, item: NewLineItem) -> Result<AddOutcome, StoreError> {
        let mut next = self.ledger.draft();

        if let Some(existing) = next.iter_mut().find(|line| item.same_line_as(line)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            let outcome = AddOutcome::Merged {
                id: existing.id,
                quantity: existing.quantity,
            };
            self.commit(next)?;
            return Ok(outcome);
        }

        let id = Uuid::new_v4();
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

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
