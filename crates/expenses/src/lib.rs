//! `chipstock-expenses` — operating-expense records.

pub mod expense;

pub use expense::{ExpenseCategory, ExpenseRecord};
