//! Finished-good production: stock in, packaging material out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::error::checked_units;
use stillhouse_core::{
    BatchId, DomainError, DomainResult, EngineConfig, EntryId, LedgerItemId, Outcome, Warning,
};
use stillhouse_inventory::InventoryLedgerItem;
use stillhouse_products::{FinishedGood, case_volume_tax};

use crate::log::ProductionLogEntry;
use crate::recipe::{PackagingType, ProductionRecipe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    pub production_date: NaiveDate,
    pub packaging_type: PackagingType,
    pub cases_produced: i64,
    pub batch_ref: Option<BatchId>,
    pub notes: String,
}

impl ProductionRequest {
    pub fn new(production_date: NaiveDate, packaging_type: PackagingType, cases_produced: i64) -> Self {
        Self {
            production_date,
            packaging_type,
            cases_produced,
            batch_ref: None,
            notes: String::new(),
        }
    }

    pub fn from_batch(mut self, batch: BatchId) -> Self {
        self.batch_ref = Some(batch);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Units drawn from one ledger item and its post-depletion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerDepletion {
    pub inventory_item_id: LedgerItemId,
    pub units: i64,
    pub updated: InventoryLedgerItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionResult {
    pub updated_good: FinishedGood,
    pub log_entry: ProductionLogEntry,
    pub ledger_updates: Vec<LedgerDepletion>,
}

/// Units of material consumed for `cases` at `qty_per_case` plus wastage.
///
/// Rounds half to even. Results outside the `i64` range are rejected.
pub fn depletion_units(cases: i64, qty_per_case: f64, wastage_factor: f64) -> DomainResult<i64> {
    let units = (cases as f64 * qty_per_case * (1.0 + wastage_factor)).round_ties_even();
    if !units.is_finite() || units.abs() >= i64::MAX as f64 {
        return Err(DomainError::validation(format!(
            "depletion of {units} units is out of range"
        )));
    }
    Ok(units as i64)
}

/// Record `request.cases_produced` cases of `good` and deplete packaging.
///
/// Only recipe rows matching the good and packaging type are used. Gaps in
/// configuration never fail the run: they come back as warnings and the
/// affected material is left untouched.
pub fn deplete_for_production(
    good: &FinishedGood,
    request: &ProductionRequest,
    recipes: &[ProductionRecipe],
    ledger_items: &[InventoryLedgerItem],
    cfg: &EngineConfig,
) -> DomainResult<Outcome<ProductionResult>> {
    let cases = request.cases_produced;
    if cases <= 0 {
        return Err(DomainError::validation("cases produced must be positive"));
    }

    let packaging = request.packaging_type;
    let rows: Vec<&ProductionRecipe> = recipes
        .iter()
        .filter(|r| r.applies_to(good.id_typed(), packaging))
        .collect();
    for row in &rows {
        row.validate()?;
    }

    let stock = packaging.add_cases(good.stock(), cases, cfg.units_per_case)?;
    let updated_good = good.with_stock(stock, cfg)?;

    let (proof_gallons_produced, excise_tax_incurred) =
        case_volume_tax(cases as f64, good.abv(), cfg);
    let log_entry = ProductionLogEntry {
        id: EntryId::new(),
        production_date: request.production_date,
        finished_good_id: good.id_typed(),
        cases_produced: cases,
        packaging_type: packaging,
        units_produced: checked_units("units produced", cases.checked_mul(cfg.units_per_case))?,
        proof_gallons_produced,
        excise_tax_incurred,
        batch_ref: request.batch_ref,
        notes: request.notes.clone(),
    };

    let mut warnings = Vec::new();
    let mut ledger_updates: Vec<LedgerDepletion> = Vec::new();

    if rows.is_empty() {
        warnings.push(Warning::MissingRecipe {
            finished_good_id: good.id_typed(),
            packaging_type: packaging.as_str().to_string(),
        });
    }

    for row in rows {
        let item_id = row.inventory_item_id;
        if row.qty_per_case <= 0.0 {
            warnings.push(Warning::EmptyRecipeRow {
                inventory_item_id: item_id,
            });
            continue;
        }

        let units = depletion_units(cases, row.qty_per_case, row.wastage_factor)?;

        // A material listed twice is depleted cumulatively.
        if let Some(existing) = ledger_updates
            .iter_mut()
            .find(|u| u.inventory_item_id == item_id)
        {
            existing.updated = existing.updated.apply_depletion(units)?;
            existing.units = checked_units("depleted units", existing.units.checked_add(units))?;
            continue;
        }

        match ledger_items.iter().find(|i| i.id_typed() == item_id) {
            Some(item) => ledger_updates.push(LedgerDepletion {
                inventory_item_id: item_id,
                units,
                updated: item.apply_depletion(units)?,
            }),
            None => warnings.push(Warning::MissingLedgerItem {
                inventory_item_id: item_id,
            }),
        }
    }

    Ok(Outcome::with_warnings(
        ProductionResult {
            updated_good,
            log_entry,
            ledger_updates,
        },
        warnings,
    ))
}
