use serde::{Deserialize, Serialize};

/// Difference between a counted quantity and what the system expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    /// `actual - system`; negative means shrinkage.
    pub variance_units: i64,
    /// Units expressed as cases, when a positive case size is known.
    pub variance_cases: Option<f64>,
    /// Relative to the system quantity; 0 when the system quantity is 0.
    pub variance_percentage: f64,
}

impl Variance {
    pub fn is_zero(&self) -> bool {
        self.variance_units == 0
    }
}

pub fn compute_variance(system_units: i64, actual_units: i64, units_per_case: Option<i64>) -> Variance {
    let variance_units = actual_units - system_units;
    let variance_percentage = if system_units > 0 {
        variance_units as f64 / system_units as f64 * 100.0
    } else {
        0.0
    };
    let variance_cases = units_per_case
        .filter(|upc| *upc > 0)
        .map(|upc| variance_units as f64 / upc as f64);

    Variance {
        variance_units,
        variance_cases,
        variance_percentage,
    }
}
