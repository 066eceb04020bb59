//! Keyed in-memory collections for the `stores` and `expenses` record sets.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use chipstock_core::{DomainError, DomainResult, ExpenseId, StoreId};
use chipstock_expenses::ExpenseRecord;
use chipstock_stores::Store;

use crate::watch::{SnapshotFeed, Subscription};

/// Record with a stable collection key.
pub trait Keyed {
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
}

impl Keyed for Store {
    type Key = StoreId;

    fn key(&self) -> StoreId {
        self.id
    }
}

impl Keyed for ExpenseRecord {
    type Key = ExpenseId;

    fn key(&self) -> ExpenseId {
        self.id
    }
}

/// In-memory keyed collection with live snapshot subscriptions.
///
/// Intended for tests/dev and as the reference implementation of the
/// persistence contract: create, field-level update, delete, and a watch
/// that delivers the full current record set on every change.
#[derive(Debug, Default)]
pub struct InMemoryCollection<T: Keyed + Clone> {
    items: RwLock<HashMap<T::Key, T>>,
    feed: SnapshotFeed<Vec<T>>,
}

impl<T: Keyed + Clone> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            feed: SnapshotFeed::new(),
        }
    }

    fn poisoned() -> DomainError {
        DomainError::persistence("collection lock poisoned")
    }

    /// Create a record. Refuses a key that is already present.
    pub fn insert(&self, item: T) -> DomainResult<()> {
        let snapshot = {
            let mut items = self.items.write().map_err(|_| Self::poisoned())?;
            if items.contains_key(&item.key()) {
                return Err(DomainError::conflict("record already exists"));
            }
            items.insert(item.key(), item);
            items.values().cloned().collect()
        };
        self.feed.publish(snapshot);
        Ok(())
    }

    /// Apply a field-level update to one record.
    pub fn update(&self, key: T::Key, apply: impl FnOnce(&mut T)) -> DomainResult<T> {
        let (updated, snapshot) = {
            let mut items = self.items.write().map_err(|_| Self::poisoned())?;
            let item = items.get_mut(&key).ok_or(DomainError::NotFound)?;
            apply(item);
            (item.clone(), items.values().cloned().collect())
        };
        self.feed.publish(snapshot);
        Ok(updated)
    }

    /// Delete a record.
    pub fn remove(&self, key: T::Key) -> DomainResult<()> {
        let snapshot = {
            let mut items = self.items.write().map_err(|_| Self::poisoned())?;
            items.remove(&key).ok_or(DomainError::NotFound)?;
            items.values().cloned().collect()
        };
        self.feed.publish(snapshot);
        Ok(())
    }

    pub fn get(&self, key: T::Key) -> Option<T> {
        let items = self.items.read().ok()?;
        items.get(&key).cloned()
    }

    /// Current full record set.
    pub fn snapshot(&self) -> Vec<T> {
        match self.items.read() {
            Ok(items) => items.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    /// Live read: full record set on every change.
    pub fn watch(&self) -> Subscription<Vec<T>> {
        self.feed.subscribe()
    }
}
