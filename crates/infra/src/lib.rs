//! Infrastructure layer: row stores, journals, configuration, and the
//! stateful `Distillery` handle that orchestrates the domain calculations.

pub mod config;
pub mod distillery;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod tax_report;


pub use distillery::{Distillery, ReceiptTarget, RowStores};
pub use error::{EngineError, EngineResult};
pub use snapshot::MonthlySnapshot;
pub use tax_report::TaxReport;
