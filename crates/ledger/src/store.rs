use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Mutex, RwLock};

use chipstock_core::{DomainError, DomainResult, LotId};

use crate::lot::{ensure_money_fields, Location, Lot, LotDraft, LotUpdate};

/// The authoritative set of lots.
///
/// Constructed once per process and injected by handle everywhere it is
/// consumed (movement engine, projections). There is no hidden singleton
/// and no caching layer in front of it.
///
/// All mutation primitives run inside a single write-lock critical section,
/// so the worst a racing caller can see is a rejected operation
/// (`InsufficientStock`/`NotFound`), never a negative quantity or a
/// persisted zero-quantity lot.
///
/// Watchers registered through [`LedgerStore::watch`] receive the full lot
/// set after every successful mutation (eventual consistency, no
/// read-your-writes guarantee). Pure projections are re-run per snapshot by
/// the subscriber, never push-driven.
#[derive(Debug, Default)]
pub struct LedgerStore {
    lots: RwLock<HashMap<LotId, Lot>>,
    watchers: Mutex<Vec<mpsc::Sender<Vec<Lot>>>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> DomainError {
        DomainError::persistence("ledger lock poisoned")
    }

    /// Register a snapshot watcher. Dead receivers are dropped on the next
    /// publish.
    pub fn watch(&self) -> mpsc::Receiver<Vec<Lot>> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut watchers) = self.watchers.lock() {
            watchers.push(tx);
        }
        rx
    }

    fn publish(&self, snapshot: Vec<Lot>) {
        if let Ok(mut watchers) = self.watchers.lock() {
            watchers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        }
    }

    /// Look up one lot.
    pub fn get(&self, id: LotId) -> DomainResult<Lot> {
        let lots = self.lots.read().map_err(|_| Self::poisoned())?;
        lots.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    /// Current full lot set.
    pub fn snapshot(&self) -> Vec<Lot> {
        match self.lots.read() {
            Ok(lots) => lots.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    /// Lots sitting at one location.
    pub fn lots_at(&self, location: Location) -> Vec<Lot> {
        self.snapshot()
            .into_iter()
            .filter(|lot| lot.location == location)
            .collect()
    }

    /// Total units on hand at one location (store stock badge).
    pub fn units_at(&self, location: Location) -> u64 {
        self.lots_at(location)
            .iter()
            .map(|lot| u64::from(lot.quantity))
            .sum()
    }

    /// Create a lot from validated draft fields and assign a fresh id.
    pub fn create_lot(&self, draft: LotDraft) -> DomainResult<Lot> {
        ensure_money_fields(draft.unit_cost, draft.unit_price)?;

        let lot = Lot {
            id: LotId::new(),
            sku: draft.sku,
            quantity: draft.quantity,
            unit_cost: draft.unit_cost,
            unit_price: draft.unit_price,
            location: draft.location,
            received_date: draft.received_at.date_naive(),
            received_at: draft.received_at,
        };

        let snapshot = {
            let mut lots = self.lots.write().map_err(|_| Self::poisoned())?;
            lots.insert(lot.id, lot.clone());
            lots.values().cloned().collect()
        };
        self.publish(snapshot);
        Ok(lot)
    }

    /// Full overwrite of identity/quantity/cost/price. No cross-field
    /// checks beyond the creation rules.
    pub fn update_lot(&self, id: LotId, update: LotUpdate) -> DomainResult<Lot> {
        ensure_money_fields(update.unit_cost, update.unit_price)?;

        let (updated, snapshot) = {
            let mut lots = self.lots.write().map_err(|_| Self::poisoned())?;
            let lot = lots.get_mut(&id).ok_or(DomainError::NotFound)?;
            lot.sku = update.sku;
            lot.quantity = update.quantity;
            lot.unit_cost = update.unit_cost;
            lot.unit_price = update.unit_price;
            (lot.clone(), lots.values().cloned().collect())
        };
        self.publish(snapshot);
        Ok(updated)
    }

    /// Explicit removal of a lot.
    pub fn delete_lot(&self, id: LotId) -> DomainResult<()> {
        let snapshot = {
            let mut lots = self.lots.write().map_err(|_| Self::poisoned())?;
            lots.remove(&id).ok_or(DomainError::NotFound)?;
            lots.values().cloned().collect()
        };
        self.publish(snapshot);
        Ok(())
    }

    /// Atomic check-then-decrement.
    ///
    /// Fails `InsufficientStock` when `by` exceeds the current quantity.
    /// A lot decremented to exactly 0 is removed in the same step; the
    /// returned snapshot reflects the post-decrement state.
    pub fn decrement(&self, id: LotId, by: u32) -> DomainResult<Lot> {
        if by == 0 {
            return Err(DomainError::validation("decrement must be at least 1"));
        }

        let (updated, snapshot) = {
            let mut lots = self.lots.write().map_err(|_| Self::poisoned())?;
            let lot = lots.get_mut(&id).ok_or(DomainError::NotFound)?;

            if by > lot.quantity {
                return Err(DomainError::insufficient_stock(by, lot.quantity));
            }

            lot.quantity -= by;
            let updated = lot.clone();
            if updated.quantity == 0 {
                lots.remove(&id);
            }
            (updated, lots.values().cloned().collect())
        };
        self.publish(snapshot);
        Ok(updated)
    }
}
