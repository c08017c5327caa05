//! Month-end inventory captures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_inventory::InventoryLedgerItem;
use stillhouse_products::FinishedGood;
use stillhouse_spirits::BulkSpirit;

/// Point-in-time copy of stock tables plus regulatory totals.
///
/// Table captures are JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub snapshot_date: NaiveDate,
    /// `YYYY-MM`.
    pub snapshot_month: String,
    pub finished_goods_json: String,
    pub bulk_spirits_json: String,
    pub inventory_json: String,
    /// Finished goods plus bulk spirits.
    pub total_proof_gallons: f64,
    /// Finished goods only.
    pub total_excise_tax_liability: f64,
    pub total_finished_cases: i64,
}

pub fn build_snapshot(
    snapshot_date: NaiveDate,
    finished_goods: &[FinishedGood],
    bulk_spirits: &[BulkSpirit],
    ledger_items: &[InventoryLedgerItem],
) -> serde_json::Result<MonthlySnapshot> {
    let goods_pg: f64 = finished_goods.iter().map(|g| g.proof_gallons()).sum();
    let spirits_pg: f64 = bulk_spirits.iter().map(|s| s.proof_gallons()).sum();

    Ok(MonthlySnapshot {
        snapshot_date,
        snapshot_month: snapshot_date.format("%Y-%m").to_string(),
        finished_goods_json: serde_json::to_string(finished_goods)?,
        bulk_spirits_json: serde_json::to_string(bulk_spirits)?,
        inventory_json: serde_json::to_string(ledger_items)?,
        total_proof_gallons: goods_pg + spirits_pg,
        total_excise_tax_liability: finished_goods.iter().map(|g| g.excise_tax_due()).sum(),
        total_finished_cases: finished_goods.iter().map(|g| g.current_stock()).sum(),
    })
}
