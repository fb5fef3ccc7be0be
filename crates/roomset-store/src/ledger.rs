//! The shared persisted list behind both stores, and the [`LineStore`]
//! interface the look materializer writes through.

use roomset_core::{LineItem, LineType, NewLineItem};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::Storage;

/// The on-disk record: `{"items": [...], "itemCount": n}`. Timestamps are
/// ISO-8601 strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub item_count: u32,
}

/// Result of [`LineStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created.
    Inserted(Uuid),
    /// An equivalent line existed; its quantity grew to `quantity`.
    Merged { id: Uuid, quantity: u32 },
    /// An equivalent line existed and the store refused the duplicate.
    Rejected(Uuid),
}

impl AddOutcome {
    /// The id of the line the add landed on.
    #[must_use]
    pub fn id(self) -> Uuid {
        match self {
            AddOutcome::Inserted(id) | AddOutcome::Rejected(id) | AddOutcome::Merged { id, .. } => {
                id
            }
        }
    }
}

/// Mutations and queries shared by the cart and the wishlist.
pub trait LineStore {
    /// Adds a line, applying the store's de-duplication rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated record cannot be persisted;
    /// the in-memory state is left unchanged in that case.
    fn add(&mut self, item: NewLineItem) -> Result<AddOutcome, StoreError>;

    /// Removes a line. Returns `false` when no line has that id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated record cannot be persisted.
    fn remove(&mut self, id: Uuid) -> Result<bool, StoreError>;

    /// Sets a line's quantity; `0` removes the line. Returns `false` when no
    /// line has that id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated record cannot be persisted.
    fn update_quantity(&mut self, id: Uuid, quantity: u32) -> Result<bool, StoreError>;

    fn items(&self) -> &[LineItem];

    fn query<P>(&self, predicate: P) -> Vec<&LineItem>
    where
        P: Fn(&LineItem) -> bool,
    {
        self.items().iter().filter(|item| predicate(item)).collect()
    }

    /// Whether a line of `line_type` with `foreign_key` exists, whatever its color.
    fn is_present(&self, foreign_key: &str, line_type: LineType) -> bool {
        self.items()
            .iter()
            .any(|item| item.kind.matches(foreign_key, line_type))
    }

    fn find(&self, id: Uuid) -> Option<&LineItem> {
        self.items().iter().find(|item| item.id == id)
    }
}

/// An item list mirrored to a [`Storage`] slot.
///
/// Every mutation builds the next list, persists it, and only then swaps it
/// in, so a failed write never leaves memory ahead of storage.
pub(crate) struct Ledger {
    items: Vec<LineItem>,
    storage: Box<dyn Storage>,
    label: &'static str,
}

impl Ledger {
    /// Loads the record from `storage`. A record that does not parse is
    /// logged and treated as empty.
    pub(crate) fn open(storage: Box<dyn Storage>, label: &'static str) -> Result<Self, StoreError> {
        let items = match storage.load()? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<PersistedRecord>(&raw) {
                Ok(record) => record.items,
                Err(e) => {
                    tracing::warn!(store = label, error = %e, "stored record is unreadable, starting empty");
                    Vec::new()
                }
            },
        };
        tracing::debug!(store = label, items = items.len(), "store loaded");
        Ok(Self {
            items,
            storage,
            label,
        })
    }

    pub(crate) fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub(crate) fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Persists `next` and makes it the current list.
    pub(crate) fn commit(&mut self, next: Vec<LineItem>, item_count: u32) -> Result<(), StoreError> {
        let record = PersistedRecord {
            items: next,
            item_count,
        };
        let raw = serde_json::to_string(&record)?;
        self.storage.save(&raw)?;
        tracing::debug!(store = self.label, items = record.items.len(), item_count, "store saved");
        self.items = record.items;
        Ok(())
    }

    /// Clones the current list for a copy-on-write mutation.
    pub(crate) fn draft(&self) -> Vec<LineItem> {
        self.items.clone()
    }
}
