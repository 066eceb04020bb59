//! `chipstock-movements` — the movement engine (transfer, sale, waste) and
//! the immutable audit records it appends.

pub mod engine;
pub mod log;
pub mod record;

pub use engine::{DeliveryLine, DeliveryNote, MovementEngine, TransferOutcome};
pub use log::MovementLog;
pub use record::{MovementKind, MovementRecord, TransferRecord};
