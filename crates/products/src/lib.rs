//! Finished goods (packaged product) domain module.
//!
//! Stock counts, derived case totals, proof gallons and excise tax for packaged
//! goods, implemented purely as deterministic domain logic (no IO, no storage).

pub mod finished_good;
pub mod metrics;

pub use finished_good::{FinishedGood, NewFinishedGood, StockCounts};
pub use metrics::{
    FinishedGoodMetrics, case_volume_tax, derive_finished_good_metrics, total_cases,
};
