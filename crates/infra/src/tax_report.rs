//! Monthly excise tax summary built from snapshots and production logs.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use stillhouse_core::units::excise_tax;
use stillhouse_core::{DomainError, DomainResult, EngineConfig};
use stillhouse_production::ProductionLogEntry;
use stillhouse_products::FinishedGood;
use stillhouse_spirits::{BatchProductionLog, BulkSpirit};

use crate::snapshot::MonthlySnapshot;

/// Proof-gallon movement and excise for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxReport {
    /// `YYYY-MM`.
    pub month: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Previous month's snapshot total; 0 when none was taken.
    pub beginning_proof_gallons: f64,
    pub proof_gallons_produced: f64,
    /// Finished goods on hand now.
    pub ending_proof_gallons: f64,
    /// `beginning + produced - ending`.
    pub proof_gallons_removed: f64,
    pub excise_tax_incurred: f64,
    pub excise_tax_on_removals: f64,
    pub batch_proof_gallons_produced: f64,
    pub bulk_spirit_weight_lbs: f64,
    pub bulk_spirit_proof_gallons: f64,
}

/// First and last day of `year-month`.
pub fn month_bounds(year: i32, month: u32) -> DomainResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::validation(format!("no such month {year}-{month:02}")))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| DomainError::validation(format!("month {year}-{month:02} is out of range")))?;
    Ok((start, end))
}

/// Inputs of a report; logs may cover any period and are filtered here.
pub struct TaxReportInputs<'a> {
    pub snapshots: &'a [MonthlySnapshot],
    pub production_log: &'a [ProductionLogEntry],
    pub batch_log: &'a [BatchProductionLog],
    pub finished_goods: &'a [FinishedGood],
    pub bulk_spirits: &'a [BulkSpirit],
}

pub fn build_tax_report(
    year: i32,
    month: u32,
    inputs: &TaxReportInputs<'_>,
    cfg: &EngineConfig,
) -> DomainResult<TaxReport> {
    let (start, end) = month_bounds(year, month)?;
    let in_period = |date: NaiveDate| start <= date && date <= end;

    let previous_month = start
        .pred_opt()
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default();
    let beginning_proof_gallons = inputs
        .snapshots
        .iter()
        .find(|s| s.snapshot_month == previous_month)
        .map(|s| s.total_proof_gallons)
        .unwrap_or(0.0);

    let produced: Vec<&ProductionLogEntry> = inputs
        .production_log
        .iter()
        .filter(|p| in_period(p.production_date))
        .collect();
    let proof_gallons_produced: f64 = produced.iter().map(|p| p.proof_gallons_produced).sum();
    let excise_tax_incurred: f64 = produced.iter().map(|p| p.excise_tax_incurred).sum();

    let ending_proof_gallons: f64 = inputs.finished_goods.iter().map(|g| g.proof_gallons()).sum();
    let proof_gallons_removed = beginning_proof_gallons + proof_gallons_produced - ending_proof_gallons;

    Ok(TaxReport {
        month: start.format("%Y-%m").to_string(),
        period_start: start,
        period_end: end,
        beginning_proof_gallons,
        proof_gallons_produced,
        ending_proof_gallons,
        proof_gallons_removed,
        excise_tax_incurred,
        excise_tax_on_removals: excise_tax(proof_gallons_removed, cfg.excise_tax_rate),
        batch_proof_gallons_produced: inputs
            .batch_log
            .iter()
            .filter(|b| in_period(b.production_date))
            .map(|b| b.proof_gallons)
            .sum(),
        bulk_spirit_weight_lbs: inputs.bulk_spirits.iter().map(|s| s.weight_lbs()).sum(),
        bulk_spirit_proof_gallons: inputs.bulk_spirits.iter().map(|s| s.proof_gallons()).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_the_calendar_month() {
        let (start, end) = month_bounds(2024, 2).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, end) = month_bounds(2025, 12).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert!(matches!(month_bounds(2025, 13), Err(DomainError::Validation(_))));
    }

    #[test]
    fn empty_month_reports_zero() {
        let inputs = TaxReportInputs {
            snapshots: &[],
            production_log: &[],
            batch_log: &[],
            finished_goods: &[],
            bulk_spirits: &[],
        };
        let report = build_tax_report(2025, 1, &inputs, &EngineConfig::default()).unwrap();
        assert_eq!(report.month, "2025-01");
        assert_eq!(report.beginning_proof_gallons, 0.0);
        assert_eq!(report.proof_gallons_removed, 0.0);
        assert_eq!(report.excise_tax_on_removals, 0.0);
    }
}
