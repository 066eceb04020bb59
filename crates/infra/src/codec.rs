//! Lenient decoding of raw record sets.
//!
//! Upstream data can be partial or malformed (hand-edited stores, older
//! writers). Aggregation must keep working anyway: a record whose date is
//! missing or unparseable is excluded, a numeric field that fails to parse
//! contributes zero, and unknown labels fall back or skip the record.
//! The typed summarizer downstream never sees malformed input.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use chipstock_core::ExpenseId;
use chipstock_expenses::{ExpenseCategory, ExpenseRecord};
use chipstock_ledger::{Location, SkuIdentity};
use chipstock_movements::{MovementKind, MovementRecord};

/// Number-or-zero coercion: accepts JSON numbers and numeric strings.
fn lenient_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn lenient_string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// `YYYY-MM-DD` or nothing.
fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let raw = value?.as_str()?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Decode a raw `movements` collection. Records without a usable date or
/// kind are dropped.
pub fn decode_movements(values: &[Value]) -> Vec<MovementRecord> {
    values
        .iter()
        .filter_map(|value| {
            let date = parse_date(value.get("date"))?;
            let kind: MovementKind =
                serde_json::from_value(value.get("kind")?.clone()).ok()?;

            let location = value
                .get("location")
                .and_then(Value::as_str)
                .and_then(|raw| Location::try_from(raw.to_string()).ok())
                .unwrap_or(Location::Warehouse);

            // Identity fields may be nested under "sku" or flat (older
            // writers stored them flat).
            let sku_field = |name: &str| {
                value
                    .get("sku")
                    .and_then(|sku| sku.get(name))
                    .or_else(|| value.get(name))
            };

            Some(MovementRecord {
                kind,
                sku: SkuIdentity {
                    category: lenient_string(sku_field("category")),
                    flavor: lenient_string(sku_field("flavor")),
                    size: lenient_string(sku_field("size")),
                },
                quantity: value
                    .get("quantity")
                    .and_then(Value::as_u64)
                    .map(|q| q as u32)
                    .unwrap_or(1),
                unit_price: lenient_decimal(value.get("unit_price")),
                unit_cost: lenient_decimal(value.get("unit_cost")),
                amount: lenient_decimal(value.get("amount")),
                location,
                date,
                reason: value
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

/// Decode a raw `expenses` collection. Records without a usable date are
/// dropped; an unrecognized category books under `Otros`.
pub fn decode_expenses(values: &[Value]) -> Vec<ExpenseRecord> {
    values
        .iter()
        .filter_map(|value| {
            let date = parse_date(value.get("date"))?;

            let id = value
                .get("id")
                .and_then(Value::as_str)
                .and_then(|raw| raw.parse::<ExpenseId>().ok())
                .unwrap_or_default();
            let category = value
                .get("category")
                .cloned()
                .and_then(|raw| serde_json::from_value::<ExpenseCategory>(raw).ok())
                .unwrap_or(ExpenseCategory::Otros);

            Some(ExpenseRecord {
                id,
                description: lenient_string(value.get("description")),
                amount: lenient_decimal(value.get("amount")),
                category,
                date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn movements_with_bad_dates_are_excluded() {
        let raw = vec![
            json!({
                "kind": "sale",
                "category": "Papas", "flavor": "Limón", "size": "Grande",
                "quantity": 1,
                "unit_price": 10, "unit_cost": 5, "amount": 10,
                "location": "warehouse",
                "date": "2025-01-15"
            }),
            json!({ "kind": "sale", "amount": 10, "date": "not-a-date" }),
            json!({ "kind": "sale", "amount": 10 }),
        ];

        let decoded = decode_movements(&raw);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].amount, dec!(10));
        assert_eq!(decoded[0].sku.flavor, "Limón");
    }

    #[test]
    fn unparseable_numbers_contribute_zero() {
        let raw = vec![json!({
            "kind": "waste",
            "reason": "bolsa rota",
            "amount": "garbage",
            "unit_cost": "7.50",
            "date": "2025-01-15"
        })];

        let decoded = decode_movements(&raw);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].amount, Decimal::ZERO);
        assert_eq!(decoded[0].unit_cost, dec!(7.50));
        assert_eq!(decoded[0].quantity, 1);
        assert_eq!(decoded[0].reason.as_deref(), Some("bolsa rota"));
    }

    #[test]
    fn unknown_movement_kinds_are_skipped() {
        let raw = vec![json!({ "kind": "refund", "date": "2025-01-15" })];
        assert!(decode_movements(&raw).is_empty());
    }

    #[test]
    fn expenses_fall_back_to_otros_and_zero() {
        let raw = vec![
            json!({
                "description": "Gasolina reparto",
                "amount": 350,
                "category": "Gasolina",
                "date": "2025-01-10"
            }),
            json!({
                "description": "???",
                "amount": "n/a",
                "category": "Imprevistos",
                "date": "2025-01-11"
            }),
            json!({ "description": "sin fecha", "amount": 10 }),
        ];

        let decoded = decode_expenses(&raw);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].category, ExpenseCategory::Gasolina);
        assert_eq!(decoded[0].amount, dec!(350));
        assert_eq!(decoded[1].category, ExpenseCategory::Otros);
        assert_eq!(decoded[1].amount, Decimal::ZERO);
    }
}
