use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chipstock_core::{DomainError, DomainResult, Entity, LotId, StoreId, ValueObject};

/// SKU identity: the (category, flavor, size) tuple naming a fungible
/// product class. Two lots with the same identity at the same location are
/// interchangeable for consumption, but stay separate receipt lots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkuIdentity {
    pub category: String,
    pub flavor: String,
    pub size: String,
}

impl SkuIdentity {
    /// Build a validated identity. All three components are required and
    /// trimmed; empty components are rejected.
    pub fn new(
        category: impl Into<String>,
        flavor: impl Into<String>,
        size: impl Into<String>,
    ) -> DomainResult<Self> {
        let category = category.into().trim().to_string();
        let flavor = flavor.into().trim().to_string();
        let size = size.into().trim().to_string();

        if category.is_empty() {
            return Err(DomainError::validation("category is required"));
        }
        if flavor.is_empty() {
            return Err(DomainError::validation("flavor is required"));
        }
        if size.is_empty() {
            return Err(DomainError::validation("size is required"));
        }

        Ok(Self {
            category,
            flavor,
            size,
        })
    }

    /// Denormalized product name used by transfer records: "category flavor".
    pub fn product_name(&self) -> String {
        format!("{} {}", self.category, self.flavor)
    }

    /// Product name with size, as printed on delivery-note lines.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.category, self.flavor, self.size)
    }

    /// Case-insensitive substring match against flavor or category.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.flavor.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }

    /// Ordering/grouping key for deterministic projections.
    pub fn key(&self) -> (String, String, String) {
        (
            self.category.clone(),
            self.flavor.clone(),
            self.size.clone(),
        )
    }
}

impl ValueObject for SkuIdentity {}

/// Where stock sits: the central warehouse or one retail store.
///
/// Serializes as the sentinel string `"warehouse"` or the store's UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Location {
    Warehouse,
    Store(StoreId),
}

impl Location {
    pub fn is_warehouse(&self) -> bool {
        matches!(self, Location::Warehouse)
    }

    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            Location::Warehouse => None,
            Location::Store(id) => Some(*id),
        }
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        match value {
            Location::Warehouse => "warehouse".to_string(),
            Location::Store(id) => id.to_string(),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "warehouse" {
            return Ok(Location::Warehouse);
        }
        value.parse::<StoreId>().map(Location::Store)
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Location::Warehouse => f.write_str("warehouse"),
            Location::Store(id) => core::fmt::Display::fmt(id, f),
        }
    }
}

/// A discrete batch of one SKU at one location, with its own cost, price
/// and receipt date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub sku: SkuIdentity,
    /// Units on hand. Never negative; a lot consumed down to 0 is removed.
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
    pub location: Location,
    /// Business receipt date.
    pub received_date: NaiveDate,
    /// Receipt instant; FIFO tie-break and audit order.
    pub received_at: DateTime<Utc>,
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &LotId {
        &self.id
    }
}

/// Fields for creating a lot (warehouse intake or transfer destination).
/// The ledger assigns the id and derives the receipt date from the instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDraft {
    pub sku: SkuIdentity,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
    pub location: Location,
    pub received_at: DateTime<Utc>,
}

/// Full manual overwrite of a lot's identity, quantity, cost and price.
/// Location and receipt date are not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotUpdate {
    pub sku: SkuIdentity,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
}

/// Creation-rule checks shared by create and update: costs and prices must
/// not be negative. SKU identity is validated at construction.
pub(crate) fn ensure_money_fields(unit_cost: Decimal, unit_price: Decimal) -> DomainResult<()> {
    if unit_cost.is_sign_negative() {
        return Err(DomainError::validation("unit cost must not be negative"));
    }
    if unit_price.is_sign_negative() {
        return Err(DomainError::validation("unit price must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sku_identity_trims_and_requires_all_components() {
        let sku = SkuIdentity::new(" Papas ", "Limón", "Grande").unwrap();
        assert_eq!(sku.category, "Papas");
        assert_eq!(sku.product_name(), "Papas Limón");
        assert_eq!(sku.display_name(), "Papas Limón (Grande)");

        let err = SkuIdentity::new("Papas", "  ", "Grande").unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("flavor") => {}
            other => panic!("expected flavor validation error, got {other:?}"),
        }
    }

    #[test]
    fn sku_query_matches_flavor_or_category_case_insensitive() {
        let sku = SkuIdentity::new("Papas", "Limón", "Grande").unwrap();
        assert!(sku.matches_query("limón"));
        assert!(sku.matches_query("PAP"));
        assert!(!sku.matches_query("grande"));
    }

    #[test]
    fn location_round_trips_through_sentinel_strings() {
        let warehouse: String = Location::Warehouse.into();
        assert_eq!(warehouse, "warehouse");
        assert_eq!(
            Location::try_from("warehouse".to_string()).unwrap(),
            Location::Warehouse
        );

        let store = Location::Store(chipstock_core::StoreId::new());
        let encoded: String = store.into();
        assert_eq!(Location::try_from(encoded).unwrap(), store);

        assert!(Location::try_from("not-a-store".to_string()).is_err());
    }

    #[test]
    fn negative_money_fields_are_rejected() {
        assert!(ensure_money_fields(dec!(0), dec!(0)).is_ok());
        assert!(ensure_money_fields(dec!(-1), dec!(10)).is_err());
        assert!(ensure_money_fields(dec!(5), dec!(-0.5)).is_err());
    }
}
