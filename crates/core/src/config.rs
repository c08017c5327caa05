//! Engine-wide constants that regulators or packaging can change.

use serde::{Deserialize, Serialize};

/// Calculation constants shared by every engine operation.
///
/// `units_per_case` is the fixed case size used when deriving finished-good
/// metrics, production units and count variances. It is separate
/// from `FinishedGood::case_size`, which is stored per product and not used by
/// those derivations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Federal excise tax per proof gallon (USD).
    pub excise_tax_rate: f64,
    /// Liquid volume of one case, in wine gallons.
    pub gallons_per_case: f64,
    /// Units (bottles/cans) per case.
    pub units_per_case: i64,
    /// Allowed deviation, in percentage points, of a batch recipe total from 100%.
    pub recipe_tolerance_pct: f64,
}

impl EngineConfig {
    pub const DEFAULT_EXCISE_TAX_RATE: f64 = 13.50;
    pub const DEFAULT_GALLONS_PER_CASE: f64 = 1.27;
    pub const DEFAULT_UNITS_PER_CASE: i64 = 24;
    pub const DEFAULT_RECIPE_TOLERANCE_PCT: f64 = 0.1;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            excise_tax_rate: Self::DEFAULT_EXCISE_TAX_RATE,
            gallons_per_case: Self::DEFAULT_GALLONS_PER_CASE,
            units_per_case: Self::DEFAULT_UNITS_PER_CASE,
            recipe_tolerance_pct: Self::DEFAULT_RECIPE_TOLERANCE_PCT,
        }
    }
}
