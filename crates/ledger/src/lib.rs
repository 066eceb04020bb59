//! `chipstock-ledger` — the inventory ledger: lots, the authoritative
//! ledger store, and the warehouse grouping projection.

pub mod grouping;
pub mod lot;
pub mod store;

pub use grouping::{group_warehouse_lots, LotGroup};
pub use lot::{Location, Lot, LotDraft, LotUpdate, SkuIdentity};
pub use store::LedgerStore;
