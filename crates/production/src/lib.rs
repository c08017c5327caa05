//! Finished-good production and the packaging depletion it drives.

pub mod depletion;
pub mod log;
pub mod recipe;

pub use depletion::{
    LedgerDepletion, ProductionRequest, ProductionResult, deplete_for_production,
    depletion_units,
};
pub use log::ProductionLogEntry;
pub use recipe::{PackagingType, ProductionRecipe};
