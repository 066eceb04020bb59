//! Append-only movement/transfer log.

use std::sync::RwLock;

use chipstock_core::{DomainError, DomainResult};
use chipstock_movements::{MovementLog, MovementRecord, TransferRecord};

use crate::watch::{SnapshotFeed, Subscription};

/// In-memory append-only audit log.
///
/// Intended for tests/dev. Records are never updated or deleted; watchers
/// receive the full log after each append.
#[derive(Debug, Default)]
pub struct InMemoryMovementLog {
    movements: RwLock<Vec<MovementRecord>>,
    transfers: RwLock<Vec<TransferRecord>>,
    movement_feed: SnapshotFeed<Vec<MovementRecord>>,
    transfer_feed: SnapshotFeed<Vec<TransferRecord>>,
}

impl InMemoryMovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> DomainError {
        DomainError::persistence("log lock poisoned")
    }

    pub fn snapshot_movements(&self) -> Vec<MovementRecord> {
        match self.movements.read() {
            Ok(records) => records.clone(),
            Err(_) => vec![],
        }
    }

    pub fn snapshot_transfers(&self) -> Vec<TransferRecord> {
        match self.transfers.read() {
            Ok(records) => records.clone(),
            Err(_) => vec![],
        }
    }

    pub fn watch_movements(&self) -> Subscription<Vec<MovementRecord>> {
        self.movement_feed.subscribe()
    }

    pub fn watch_transfers(&self) -> Subscription<Vec<TransferRecord>> {
        self.transfer_feed.subscribe()
    }
}

impl MovementLog for InMemoryMovementLog {
    fn append_movement(&self, record: MovementRecord) -> DomainResult<()> {
        let snapshot = {
            let mut records = self.movements.write().map_err(|_| Self::poisoned())?;
            records.push(record);
            records.clone()
        };
        self.movement_feed.publish(snapshot);
        Ok(())
    }

    fn append_transfer(&self, record: TransferRecord) -> DomainResult<()> {
        let snapshot = {
            let mut records = self.transfers.write().map_err(|_| Self::poisoned())?;
            records.push(record);
            records.clone()
        };
        self.transfer_feed.publish(snapshot);
        Ok(())
    }
}
