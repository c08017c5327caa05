//! Non-fatal conditions surfaced alongside successful results.

use serde::{Deserialize, Serialize};

use crate::id::{BulkSpiritId, FinishedGoodId, LedgerItemId};

/// Missing-configuration warnings.
///
/// The operation that produced one of these still completed the parts it
/// could; the caller is expected to show the gap to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// No production recipe rows exist for this good and packaging type.
    MissingRecipe {
        finished_good_id: FinishedGoodId,
        packaging_type: String,
    },
    /// A production recipe references a ledger item that no longer exists.
    MissingLedgerItem { inventory_item_id: LedgerItemId },
    /// A production recipe row has no positive quantity per case.
    EmptyRecipeRow { inventory_item_id: LedgerItemId },
    /// A batch recipe references a bulk spirit that no longer exists.
    MissingSpirit {
        bulk_spirit_id: BulkSpiritId,
        ingredient_name: String,
    },
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Warning::MissingRecipe {
                finished_good_id,
                packaging_type,
            } => write!(
                f,
                "no production recipe for {finished_good_id} ({packaging_type}); no inventory depleted"
            ),
            Warning::MissingLedgerItem { inventory_item_id } => {
                write!(f, "recipe references missing inventory item {inventory_item_id}")
            }
            Warning::EmptyRecipeRow { inventory_item_id } => {
                write!(f, "recipe row for {inventory_item_id} has no quantity per case")
            }
            Warning::MissingSpirit {
                bulk_spirit_id,
                ingredient_name,
            } => write!(
                f,
                "batch recipe ingredient {ingredient_name} references missing spirit {bulk_spirit_id}"
            ),
        }
    }
}

/// A primary result plus every non-fatal warning raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
