//! `chipstock-stores` — retail store registry: the store entity and the
//! removal guard over floor stock.

pub mod store;

pub use store::{ensure_removable, Store};
