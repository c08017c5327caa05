use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::{DomainError, DomainResult, EngineConfig, EntryId, FinishedGoodId, LedgerItemId};
use stillhouse_inventory::InventoryLedgerItem;
use stillhouse_products::{FinishedGood, StockCounts};

use crate::variance::{Variance, compute_variance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_type", content = "id", rename_all = "snake_case")]
pub enum CountedEntity {
    FinishedGood(FinishedGoodId),
    LedgerItem(LedgerItemId),
}

/// Quantities as they were recorded, before any adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountedValues {
    Stock(StockCounts),
    Units(i64),
}

/// Immutable record of one counted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalCount {
    pub id: EntryId,
    pub count_date: NaiveDate,
    pub entity: CountedEntity,
    pub system: CountedValues,
    pub actual: CountedValues,
    pub variance: Variance,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRequest {
    pub count_date: NaiveDate,
    /// Overwrite system stock with the counted values.
    pub adjust: bool,
    pub notes: String,
}

impl CountRequest {
    pub fn record_only(count_date: NaiveDate) -> Self {
        Self {
            count_date,
            adjust: false,
            notes: String::new(),
        }
    }

    pub fn adjusting(count_date: NaiveDate) -> Self {
        Self {
            count_date,
            adjust: true,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A count record plus the adjusted row when the request asked for one.
#[derive(Debug, Clone, PartialEq)]
pub struct CountResult<T> {
    pub record: PhysicalCount,
    pub adjusted: Option<T>,
}

/// Count a finished good. Both sides are compared in units.
pub fn count_finished_good(
    good: &FinishedGood,
    actual: StockCounts,
    request: &CountRequest,
    cfg: &EngineConfig,
) -> DomainResult<CountResult<FinishedGood>> {
    actual.validate()?;
    let upc = cfg.units_per_case;
    let system = good.stock();
    let variance = compute_variance(
        system.total_units(upc)?,
        actual.total_units(upc)?,
        Some(upc),
    );

    let adjusted = if request.adjust {
        Some(good.with_stock(actual, cfg)?)
    } else {
        None
    };

    Ok(CountResult {
        record: PhysicalCount {
            id: EntryId::new(),
            count_date: request.count_date,
            entity: CountedEntity::FinishedGood(good.id_typed()),
            system: CountedValues::Stock(system),
            actual: CountedValues::Stock(actual),
            variance,
            notes: request.notes.clone(),
        },
        adjusted,
    })
}

/// Count a ledger item. Adjusting back-solves `added` so history is kept.
pub fn count_ledger_item(
    item: &InventoryLedgerItem,
    actual_units: i64,
    request: &CountRequest,
) -> DomainResult<CountResult<InventoryLedgerItem>> {
    if actual_units < 0 {
        return Err(DomainError::validation("counted units cannot be negative"));
    }
    let adjusted = if request.adjust {
        Some(item.reconcile_to_count(actual_units)?)
    } else {
        None
    };

    let system_units = item.units_remaining();
    let variance = compute_variance(system_units, actual_units, Some(item.units_per_case()));

    Ok(CountResult {
        record: PhysicalCount {
            id: EntryId::new(),
            count_date: request.count_date,
            entity: CountedEntity::LedgerItem(item.id_typed()),
            system: CountedValues::Units(system_units),
            actual: CountedValues::Units(actual_units),
            variance,
            notes: request.notes.clone(),
        },
        adjusted,
    })
}

/// Summary over the lines of one counting session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountSession {
    counts: Vec<PhysicalCount>,
}

impl CountSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, count: PhysicalCount) {
        self.counts.push(count);
    }

    pub fn counts(&self) -> &[PhysicalCount] {
        &self.counts
    }

    pub fn items_counted(&self) -> usize {
        self.counts.len()
    }

    pub fn items_with_variance(&self) -> usize {
        self.counts.iter().filter(|c| !c.variance.is_zero()).count()
    }

    pub fn total_variance_cases(&self) -> f64 {
        self.counts
            .iter()
            .filter_map(|c| c.variance.variance_cases)
            .sum()
    }
}

impl FromIterator<PhysicalCount> for CountSession {
    fn from_iter<I: IntoIterator<Item = PhysicalCount>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
