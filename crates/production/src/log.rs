use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::{BatchId, EntryId, FinishedGoodId};

use crate::recipe::PackagingType;

/// Immutable record of one finished-good production run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLogEntry {
    pub id: EntryId,
    pub production_date: NaiveDate,
    pub finished_good_id: FinishedGoodId,
    pub cases_produced: i64,
    pub packaging_type: PackagingType,
    pub units_produced: i64,
    pub proof_gallons_produced: f64,
    pub excise_tax_incurred: f64,
    pub batch_ref: Option<BatchId>,
    pub notes: String,
}
