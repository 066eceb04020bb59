use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chipstock_core::{DomainError, DomainResult, Entity, ExpenseId};

/// Operating-expense bucket. Wire labels keep the Spanish names the books
/// have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Gasolina,
    #[serde(rename = "Nómina")]
    Nomina,
    Insumos,
    Mantenimiento,
    Publicidad,
    Otros,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Gasolina,
        ExpenseCategory::Nomina,
        ExpenseCategory::Insumos,
        ExpenseCategory::Mantenimiento,
        ExpenseCategory::Publicidad,
        ExpenseCategory::Otros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Gasolina => "Gasolina",
            ExpenseCategory::Nomina => "Nómina",
            ExpenseCategory::Insumos => "Insumos",
            ExpenseCategory::Mantenimiento => "Mantenimiento",
            ExpenseCategory::Publicidad => "Publicidad",
            ExpenseCategory::Otros => "Otros",
        }
    }
}

impl core::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One operating expense. Independent of the inventory ledger; only the
/// period summarizer consumes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Capture an expense. Description is required; amounts must be
    /// strictly positive.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> DomainResult<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(DomainError::validation("expense description is required"));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("expense amount must be positive"));
        }

        Ok(Self {
            id: ExpenseId::new(),
            description,
            amount,
            category,
            date,
        })
    }
}

impl Entity for ExpenseRecord {
    type Id = ExpenseId;

    fn id(&self) -> &ExpenseId {
        &self.id
    }
}
