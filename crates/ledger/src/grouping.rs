//! Warehouse grouping projection.
//!
//! A read-only recomputation over the current lot set; callers re-run it on
//! every snapshot they care about. It never mutates the ledger and tolerates
//! the underlying store changing between calls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::lot::{Lot, SkuIdentity};

/// One fungible product class at the warehouse: total units plus the
/// individual receipt lots in consumption order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotGroup {
    pub sku: SkuIdentity,
    pub total_quantity: u64,
    /// Member lots ascending by (received_date, received_at): the first
    /// entry is the oldest lot and should be depleted first (FIFO).
    pub lots: Vec<Lot>,
}

/// Group warehouse lots by SKU identity, optionally filtered by a
/// case-insensitive substring match against flavor or category.
///
/// Groups come out ordered by the SKU tuple, so two calls over the same
/// snapshot produce identical output.
pub fn group_warehouse_lots(lots: &[Lot], query: Option<&str>) -> Vec<LotGroup> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let mut groups: BTreeMap<(String, String, String), Vec<Lot>> = BTreeMap::new();
    for lot in lots {
        if !lot.location.is_warehouse() {
            continue;
        }
        if let Some(q) = query {
            if !lot.sku.matches_query(q) {
                continue;
            }
        }
        groups.entry(lot.sku.key()).or_default().push(lot.clone());
    }

    groups
        .into_values()
        .map(|mut members| {
            members.sort_by(|a, b| {
                (a.received_date, a.received_at).cmp(&(b.received_date, b.received_at))
            });
            LotGroup {
                sku: members[0].sku.clone(),
                total_quantity: members.iter().map(|lot| u64::from(lot.quantity)).sum(),
                lots: members,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::Location;
    use chipstock_core::{LotId, StoreId};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn lot(flavor: &str, quantity: u32, day: u32, location: Location) -> Lot {
        let received_at = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        Lot {
            id: LotId::new(),
            sku: SkuIdentity::new("Papas", flavor, "Grande").unwrap(),
            quantity,
            unit_cost: dec!(5),
            unit_price: dec!(10),
            location,
            received_date: received_at.date_naive(),
            received_at,
        }
    }

    #[test]
    fn groups_same_sku_and_sums_quantities() {
        let lots = vec![
            lot("Limón", 3, 2, Location::Warehouse),
            lot("Limón", 5, 1, Location::Warehouse),
            lot("Habanero", 4, 1, Location::Warehouse),
        ];

        let groups = group_warehouse_lots(&lots, None);
        assert_eq!(groups.len(), 2);

        let limon = groups
            .iter()
            .find(|g| g.sku.flavor == "Limón")
            .expect("Limón group");
        assert_eq!(limon.total_quantity, 8);
        assert_eq!(limon.lots.len(), 2);
    }

    #[test]
    fn lots_within_a_group_are_fifo_ordered() {
        let newest = lot("Limón", 1, 9, Location::Warehouse);
        let oldest = lot("Limón", 1, 1, Location::Warehouse);
        let middle = lot("Limón", 1, 4, Location::Warehouse);

        let groups = group_warehouse_lots(&[newest, oldest.clone(), middle], None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lots[0].id, oldest.id);

        let dates: Vec<_> = groups[0].lots.iter().map(|l| l.received_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn timestamp_breaks_same_day_ties() {
        let mut first = lot("Limón", 1, 1, Location::Warehouse);
        let mut second = lot("Limón", 1, 1, Location::Warehouse);
        first.received_at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        second.received_at = Utc.with_ymd_and_hms(2025, 3, 1, 17, 0, 0).unwrap();

        let groups = group_warehouse_lots(&[second.clone(), first.clone()], None);
        assert_eq!(groups[0].lots[0].id, first.id);
        assert_eq!(groups[0].lots[1].id, second.id);
    }

    #[test]
    fn store_lots_are_excluded() {
        let lots = vec![
            lot("Limón", 3, 1, Location::Warehouse),
            lot("Limón", 9, 1, Location::Store(StoreId::new())),
        ];

        let groups = group_warehouse_lots(&lots, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_quantity, 3);
    }

    #[test]
    fn query_filters_on_flavor_or_category() {
        let lots = vec![
            lot("Limón", 3, 1, Location::Warehouse),
            lot("Habanero", 4, 1, Location::Warehouse),
        ];

        let by_flavor = group_warehouse_lots(&lots, Some("limó"));
        assert_eq!(by_flavor.len(), 1);
        assert_eq!(by_flavor[0].sku.flavor, "Limón");

        // Category matches hit every group here.
        let by_category = group_warehouse_lots(&lots, Some("papas"));
        assert_eq!(by_category.len(), 2);

        // Blank queries are treated as no filter.
        assert_eq!(group_warehouse_lots(&lots, Some("  ")).len(), 2);
    }

    #[test]
    fn repeated_calls_over_one_snapshot_are_identical() {
        let lots = vec![
            lot("Limón", 3, 2, Location::Warehouse),
            lot("Habanero", 4, 1, Location::Warehouse),
            lot("Limón", 5, 1, Location::Warehouse),
        ];

        assert_eq!(
            group_warehouse_lots(&lots, None),
            group_warehouse_lots(&lots, None)
        );
    }
}
