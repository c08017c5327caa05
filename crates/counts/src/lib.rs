//! Physical counts and variance against system stock.
//!
//! Pure domain logic: callers supply the current records and persist the
//! returned count records and adjusted rows.

pub mod physical_count;
pub mod variance;
pub mod waste;

pub use physical_count::{
    CountResult, CountSession, CountedEntity, CountedValues, CountRequest, PhysicalCount,
    count_finished_good, count_ledger_item,
};
pub use variance::{Variance, compute_variance};
pub use waste::{ProductWaste, WasteAnalysis, analyze_waste};
