//! Append-only movement/transfer log boundary.
//!
//! The log is owned by the persistence collaborator; the engine only ever
//! appends. Implementations must surface failures: a failed append leaves
//! the ledger mutation in place (no compensating rollback), and callers are
//! expected to re-read before retrying.

use std::sync::Arc;

use chipstock_core::DomainResult;

use crate::record::{MovementRecord, TransferRecord};

/// Append-only sink for audit records.
pub trait MovementLog: Send + Sync {
    fn append_movement(&self, record: MovementRecord) -> DomainResult<()>;

    fn append_transfer(&self, record: TransferRecord) -> DomainResult<()>;
}

impl<L> MovementLog for Arc<L>
where
    L: MovementLog + ?Sized,
{
    fn append_movement(&self, record: MovementRecord) -> DomainResult<()> {
        (**self).append_movement(record)
    }

    fn append_transfer(&self, record: TransferRecord) -> DomainResult<()> {
        (**self).append_transfer(record)
    }
}
