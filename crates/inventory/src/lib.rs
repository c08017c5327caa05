//! Packaging/material inventory ledger.
//!
//! This crate contains the started/depleted/added/remaining bookkeeping for
//! countable items (bottles, lids, labels, cartons), implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod ledger;

pub use ledger::{InventoryLedgerItem, LedgerEdit, NewLedgerItem, reconcile_ledger_edit};
