use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use chipstock_core::{DomainError, DomainResult, LotId};
use chipstock_ledger::{LedgerStore, Location, Lot, LotDraft};
use chipstock_stores::Store;

use crate::log::MovementLog;
use crate::record::{MovementRecord, TransferRecord};

/// One line of a delivery note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryLine {
    pub quantity: u32,
    pub product_name: String,
    pub unit_price: Decimal,
}

impl DeliveryLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Payload handed to the print collaborator after a confirmed transfer:
/// destination identity, line items, and totals. Assembled, never rendered,
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryNote {
    pub store: Store,
    pub lines: Vec<DeliveryLine>,
    pub total_units: u32,
    pub total_value: Decimal,
}

/// Everything a confirmed transfer produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// The new lot created at the destination store.
    pub destination_lot: Lot,
    pub record: TransferRecord,
    pub delivery_note: DeliveryNote,
}

/// The three domain operations over the ledger: transfer, sale, waste.
///
/// The engine holds no state of its own. Each operation validates, commits
/// through the ledger's atomic decrement, then appends its audit record.
/// State may change between a caller's pre-flight check and the commit;
/// the decrement re-validates, so a lost race surfaces as
/// `InsufficientStock`/`NotFound` rather than corrupt quantities.
pub struct MovementEngine<L: MovementLog> {
    ledger: Arc<LedgerStore>,
    log: L,
}

impl<L: MovementLog> MovementEngine<L> {
    pub fn new(ledger: Arc<LedgerStore>, log: L) -> Self {
        Self { ledger, log }
    }

    /// Move `quantity` units of a warehouse lot to `store`.
    ///
    /// The destination gains an independent lot carrying the source's SKU
    /// identity and unit cost but the *given* transfer price, received
    /// "now". It is never merged into an existing same-SKU lot at the
    /// store; grouping stays a read-time concern.
    pub fn transfer(
        &self,
        source: LotId,
        store: &Store,
        quantity: u32,
        unit_price: Decimal,
        at: DateTime<Utc>,
    ) -> DomainResult<TransferOutcome> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "transfer quantity must be at least 1",
            ));
        }
        if unit_price.is_sign_negative() {
            return Err(DomainError::validation(
                "transfer price must not be negative",
            ));
        }

        let consumed = match self.ledger.decrement(source, quantity) {
            Ok(lot) => lot,
            Err(err) => {
                warn!(lot = %source, quantity, %err, "transfer rejected");
                return Err(err);
            }
        };

        let destination_lot = self.ledger.create_lot(LotDraft {
            sku: consumed.sku.clone(),
            quantity,
            unit_cost: consumed.unit_cost,
            unit_price,
            location: Location::Store(store.id),
            received_at: at,
        })?;

        let record = TransferRecord {
            product_name: consumed.sku.product_name(),
            store_id: store.id,
            quantity,
            unit_price,
            date: at.date_naive(),
        };
        self.log.append_transfer(record.clone())?;

        let line = DeliveryLine {
            quantity,
            product_name: consumed.sku.display_name(),
            unit_price,
        };
        let total_value = line.subtotal();
        let delivery_note = DeliveryNote {
            store: store.clone(),
            lines: vec![line],
            total_units: quantity,
            total_value,
        };

        info!(
            lot = %source,
            store = %store.id,
            quantity,
            %total_value,
            "stock transferred"
        );

        Ok(TransferOutcome {
            destination_lot,
            record,
            delivery_note,
        })
    }

    /// Sell exactly one unit of `lot`, valued at its unit price.
    pub fn sale(&self, lot: LotId, at: DateTime<Utc>) -> DomainResult<MovementRecord> {
        let consumed = self.ledger.decrement(lot, 1)?;

        let record = MovementRecord::sale(&consumed, at.date_naive());
        self.log.append_movement(record.clone())?;

        info!(lot = %lot, amount = %record.amount, "sale recorded");
        Ok(record)
    }

    /// Write off exactly one unit of `lot`, valued at its unit cost.
    ///
    /// The reason is mandatory; it is checked before any mutation.
    pub fn waste(
        &self,
        lot: LotId,
        reason: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<MovementRecord> {
        let reason = reason.trim();
        if reason.is_empty() {
            warn!(lot = %lot, "waste rejected: missing reason");
            return Err(DomainError::validation("waste reason is required"));
        }

        let consumed = self.ledger.decrement(lot, 1)?;

        let record = MovementRecord::waste(&consumed, reason.to_string(), at.date_naive());
        self.log.append_movement(record.clone())?;

        info!(lot = %lot, amount = %record.amount, "waste recorded");
        Ok(record)
    }
}
