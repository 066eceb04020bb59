//! Period summarizer and the financial-report payload.
//!
//! Pure recomputation over the record sets: same inputs and selector, same
//! output. The caller re-runs it on each snapshot it receives from the
//! persistence collaborator.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use chipstock_core::StoreId;
use chipstock_expenses::ExpenseRecord;
use chipstock_movements::{MovementKind, MovementRecord};
use chipstock_stores::Store;

use crate::period::Period;

/// The four derived totals for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    /// Σ amount over sale movements.
    pub total_sales: Decimal,
    /// Σ unit cost over waste movements (loss of cost basis).
    pub total_waste_value: Decimal,
    /// Σ amount over expenses.
    pub total_expenses: Decimal,
    /// `total_sales − total_expenses − total_waste_value`.
    pub net_profit: Decimal,
}

/// Totals plus the matched record sets, for tabular display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub totals: PeriodTotals,
    pub movements: Vec<MovementRecord>,
    pub expenses: Vec<ExpenseRecord>,
}

/// Filter movements and expenses down to `period` and derive the totals.
pub fn summarize(
    movements: &[MovementRecord],
    expenses: &[ExpenseRecord],
    period: Period,
) -> PeriodSummary {
    let movements: Vec<MovementRecord> = movements
        .iter()
        .filter(|m| period.contains(m.date))
        .cloned()
        .collect();
    let expenses: Vec<ExpenseRecord> = expenses
        .iter()
        .filter(|e| period.contains(e.date))
        .cloned()
        .collect();

    let total_sales: Decimal = movements
        .iter()
        .filter(|m| m.kind == MovementKind::Sale)
        .map(|m| m.amount)
        .sum();
    let total_waste_value: Decimal = movements
        .iter()
        .filter(|m| m.kind == MovementKind::Waste)
        .map(|m| m.unit_cost)
        .sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    PeriodSummary {
        period,
        totals: PeriodTotals {
            total_sales,
            total_waste_value,
            total_expenses,
            net_profit: total_sales - total_expenses - total_waste_value,
        },
        movements,
        expenses,
    }
}

/// Payload handed to the print collaborator: period label, totals, matched
/// rows, and the store-id → name lookup the renderer resolves row labels
/// with. Assembled, never rendered, here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialReport {
    pub period_label: String,
    pub totals: PeriodTotals,
    pub expenses: Vec<ExpenseRecord>,
    pub movements: Vec<MovementRecord>,
    pub store_names: HashMap<StoreId, String>,
}

pub fn financial_report(summary: &PeriodSummary, stores: &[Store]) -> FinancialReport {
    FinancialReport {
        period_label: summary.period.label(),
        totals: summary.totals,
        expenses: summary.expenses.clone(),
        movements: summary.movements.clone(),
        store_names: stores
            .iter()
            .map(|store| (store.id, store.name.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::MonthFilter;
    use chipstock_expenses::ExpenseCategory;
    use chipstock_ledger::{Location, SkuIdentity};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movement(kind: MovementKind, amount: Decimal, cost: Decimal, date: NaiveDate) -> MovementRecord {
        MovementRecord {
            kind,
            sku: SkuIdentity::new("Papas", "Limón", "Grande").unwrap(),
            quantity: 1,
            unit_price: dec!(10),
            unit_cost: cost,
            amount,
            location: Location::Store(chipstock_core::StoreId::new()),
            date,
            reason: match kind {
                MovementKind::Sale => None,
                MovementKind::Waste => Some("dañado".to_string()),
            },
        }
    }

    fn expense(amount: Decimal, date: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::new("Gasolina reparto", amount, ExpenseCategory::Gasolina, date).unwrap()
    }

    #[test]
    fn two_sales_at_ten_total_twenty() {
        let movements = vec![
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 15)),
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 20)),
        ];

        let summary = summarize(&movements, &[], Period::year_of(2025));
        assert_eq!(summary.totals.total_sales, dec!(20));
        assert_eq!(summary.totals.total_waste_value, dec!(0));
        assert_eq!(summary.totals.net_profit, dec!(20));
        assert_eq!(summary.movements.len(), 2);
    }

    #[test]
    fn waste_is_valued_at_cost_not_price() {
        let movements = vec![movement(
            MovementKind::Waste,
            dec!(5),
            dec!(5),
            date(2025, 1, 15),
        )];

        let summary = summarize(&movements, &[], Period::year_of(2025));
        assert_eq!(summary.totals.total_sales, dec!(0));
        assert_eq!(summary.totals.total_waste_value, dec!(5));
        assert_eq!(summary.totals.net_profit, dec!(-5));
    }

    #[test]
    fn month_filter_narrows_the_matched_sets() {
        let movements = vec![
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 15)),
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 2, 20)),
        ];

        let whole_year = summarize(&movements, &[], Period::year_of(2025));
        assert_eq!(whole_year.movements.len(), 2);

        let january = summarize(&movements, &[], Period::new(2025, MonthFilter::Month(0)));
        assert_eq!(january.movements.len(), 1);
        assert_eq!(january.movements[0].date, date(2025, 1, 15));
        assert_eq!(january.totals.total_sales, dec!(10));
    }

    #[test]
    fn net_profit_subtracts_expenses_and_waste() {
        let movements = vec![
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 15)),
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 16)),
            movement(MovementKind::Waste, dec!(5), dec!(5), date(2025, 1, 17)),
        ];
        let expenses = vec![expense(dec!(7), date(2025, 1, 10))];

        let summary = summarize(&movements, &expenses, Period::year_of(2025));
        assert_eq!(summary.totals.total_sales, dec!(20));
        assert_eq!(summary.totals.total_expenses, dec!(7));
        assert_eq!(summary.totals.total_waste_value, dec!(5));
        assert_eq!(summary.totals.net_profit, dec!(8));
    }

    #[test]
    fn expenses_outside_the_period_are_ignored() {
        let expenses = vec![
            expense(dec!(7), date(2025, 1, 10)),
            expense(dec!(9), date(2024, 12, 31)),
        ];

        let summary = summarize(&[], &expenses, Period::year_of(2025));
        assert_eq!(summary.totals.total_expenses, dec!(7));
        assert_eq!(summary.expenses.len(), 1);
    }

    #[test]
    fn summarize_is_idempotent() {
        let movements = vec![
            movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 15)),
            movement(MovementKind::Waste, dec!(5), dec!(5), date(2025, 3, 2)),
        ];
        let expenses = vec![expense(dec!(7), date(2025, 1, 10))];
        let period = Period::year_of(2025);

        assert_eq!(
            summarize(&movements, &expenses, period),
            summarize(&movements, &expenses, period)
        );
    }

    #[test]
    fn report_payload_carries_label_rows_and_store_lookup() {
        let store = Store::new("Tienda Centro", None, None, None).unwrap();
        let movements = vec![movement(MovementKind::Sale, dec!(10), dec!(5), date(2025, 1, 15))];

        let summary = summarize(&movements, &[], Period::new(2025, MonthFilter::Month(0)));
        let report = financial_report(&summary, std::slice::from_ref(&store));

        assert_eq!(report.period_label, "Enero 2025");
        assert_eq!(report.movements.len(), 1);
        assert_eq!(report.store_names.get(&store.id).unwrap(), "Tienda Centro");
    }
}
