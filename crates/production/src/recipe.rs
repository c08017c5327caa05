use serde::{Deserialize, Serialize};

use stillhouse_core::error::checked_units;
use stillhouse_core::{DomainError, DomainResult, FinishedGoodId, LedgerItemId};
use stillhouse_products::StockCounts;

/// How produced cases are packed, which decides both the stock field they
/// land in and which recipe rows apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackagingType {
    Singles,
    #[serde(rename = "Shipping (S)")]
    Shipping,
    #[serde(rename = "In-store (I)")]
    InStore,
}

impl PackagingType {
    pub fn as_str(self) -> &'static str {
        match self {
            PackagingType::Singles => "Singles",
            PackagingType::Shipping => "Shipping (S)",
            PackagingType::InStore => "In-store (I)",
        }
    }

    /// Stock after adding `cases` in this packaging.
    pub fn add_cases(
        self,
        stock: StockCounts,
        cases: i64,
        units_per_case: i64,
    ) -> DomainResult<StockCounts> {
        let mut next = stock;
        match self {
            PackagingType::Singles => {
                next.singles = checked_units(
                    "singles",
                    cases
                        .checked_mul(units_per_case)
                        .and_then(|units| next.singles.checked_add(units)),
                )?;
            }
            PackagingType::Shipping => {
                next.bottled_s = checked_units("shipping cases", next.bottled_s.checked_add(cases))?;
            }
            PackagingType::InStore => {
                next.bottled_i = checked_units("in-store cases", next.bottled_i.checked_add(cases))?;
            }
        }
        Ok(next)
    }
}

impl core::fmt::Display for PackagingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packaging material consumed per case of a finished good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecipe {
    pub finished_good_id: FinishedGoodId,
    pub inventory_item_id: LedgerItemId,
    pub packaging_type: PackagingType,
    pub qty_per_case: f64,
    /// Fractional overage, 0..=1.
    pub wastage_factor: f64,
}

impl ProductionRecipe {
    pub fn new(
        finished_good_id: FinishedGoodId,
        inventory_item_id: LedgerItemId,
        packaging_type: PackagingType,
        qty_per_case: f64,
    ) -> Self {
        Self {
            finished_good_id,
            inventory_item_id,
            packaging_type,
            qty_per_case,
            wastage_factor: 0.0,
        }
    }

    pub fn with_wastage(mut self, wastage_factor: f64) -> Self {
        self.wastage_factor = wastage_factor;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.qty_per_case.is_finite() || self.qty_per_case < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity per case must be finite and non-negative, got {}",
                self.qty_per_case
            )));
        }
        if !(0.0..=1.0).contains(&self.wastage_factor) {
            return Err(DomainError::validation(format!(
                "wastage factor must be within 0..=1, got {}",
                self.wastage_factor
            )));
        }
        Ok(())
    }

    pub fn applies_to(&self, good: FinishedGoodId, packaging: PackagingType) -> bool {
        self.finished_good_id == good && self.packaging_type == packaging
    }
}
