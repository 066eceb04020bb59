use serde::{Deserialize, Serialize};

use chipstock_core::{DomainError, DomainResult, Entity, StoreId};
use chipstock_ledger::{Location, Lot};

/// A registered point of sale. Name is required; the rest is contact
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub location: Option<String>,
    pub manager: Option<String>,
    pub phone: Option<String>,
}

impl Store {
    /// Register a store. The name is trimmed and must be non-empty;
    /// optional fields are normalized so blanks become `None`.
    pub fn new(
        name: impl Into<String>,
        location: Option<String>,
        manager: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("store name is required"));
        }

        Ok(Self {
            id: StoreId::new(),
            name,
            location: normalize(location),
            manager: normalize(manager),
            phone: normalize(phone),
        })
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &StoreId {
        &self.id
    }
}

fn normalize(field: Option<String>) -> Option<String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Removal guard: a store that still holds stock cannot be deregistered.
/// Records referencing a store removed while empty keep their denormalized
/// snapshots; reports simply render the store name as unknown.
pub fn ensure_removable(store_id: StoreId, lots: &[Lot]) -> DomainResult<()> {
    let units: u64 = lots
        .iter()
        .filter(|lot| lot.location == Location::Store(store_id))
        .map(|lot| u64::from(lot.quantity))
        .sum();

    if units > 0 {
        return Err(DomainError::conflict(format!(
            "store still holds {units} units of stock"
        )));
    }
    Ok(())
}
