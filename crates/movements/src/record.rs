use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chipstock_core::StoreId;
use chipstock_ledger::{Location, Lot, SkuIdentity};

/// Movement kind: a single-unit sale or a single-unit recorded loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Sale,
    Waste,
}

/// Immutable audit entry for one consumed unit.
///
/// Fields are snapshots taken at consumption time; later edits or deletions
/// of the source lot never rewrite a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub kind: MovementKind,
    pub sku: SkuIdentity,
    /// Always 1: floor stock is sold and written off piece by piece.
    pub quantity: u32,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    /// Booked value of the movement: unit price for a sale, unit cost for
    /// waste (waste is a loss of cost basis, not of potential revenue).
    pub amount: Decimal,
    /// The store the unit left from (or the warehouse sentinel).
    pub location: Location,
    pub date: NaiveDate,
    /// Mandatory for waste, absent for sales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MovementRecord {
    /// Snapshot a one-unit sale of `lot`.
    pub fn sale(lot: &Lot, date: NaiveDate) -> Self {
        Self {
            kind: MovementKind::Sale,
            sku: lot.sku.clone(),
            quantity: 1,
            unit_price: lot.unit_price,
            unit_cost: lot.unit_cost,
            amount: lot.unit_price,
            location: lot.location,
            date,
            reason: None,
        }
    }

    /// Snapshot a one-unit write-off of `lot`.
    pub fn waste(lot: &Lot, reason: String, date: NaiveDate) -> Self {
        Self {
            kind: MovementKind::Waste,
            sku: lot.sku.clone(),
            quantity: 1,
            unit_price: lot.unit_price,
            unit_cost: lot.unit_cost,
            amount: lot.unit_cost,
            location: lot.location,
            date,
            reason: Some(reason),
        }
    }
}

/// Immutable audit entry for one confirmed warehouse → store transfer.
///
/// `product_name` is a deliberate denormalized snapshot, not a key into the
/// lot set: the record must stay stable if the source lot is later edited
/// or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub product_name: String,
    pub store_id: StoreId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub date: NaiveDate,
}
