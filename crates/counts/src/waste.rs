//! Waste analysis over the finished-good count history.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::FinishedGoodId;

use crate::physical_count::{CountedEntity, PhysicalCount};

/// Accumulated count variance of one finished good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWaste {
    pub finished_good_id: FinishedGoodId,
    pub total_variance_units: i64,
    pub count_events: usize,
}

impl ProductWaste {
    pub fn average_variance_units(&self) -> f64 {
        if self.count_events == 0 {
            return 0.0;
        }
        self.total_variance_units as f64 / self.count_events as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteAnalysis {
    pub total_variance_units: i64,
    pub total_variance_cases: f64,
    /// Distinct count dates seen.
    pub count_dates: usize,
    /// Largest shrinkage first.
    pub products: Vec<ProductWaste>,
    /// Net variance in cases per count date, oldest first.
    pub trend: Vec<(NaiveDate, f64)>,
}

impl WasteAnalysis {
    /// Net case variance per counting day; 0 with no counts.
    pub fn average_variance_cases_per_count(&self) -> f64 {
        if self.count_dates == 0 {
            return 0.0;
        }
        self.total_variance_cases / self.count_dates as f64
    }
}

/// Summarize finished-good counts dated on or after `since`.
///
/// Ledger-item counts are not part of waste analysis and are skipped.
pub fn analyze_waste<'a>(
    counts: impl IntoIterator<Item = &'a PhysicalCount>,
    since: Option<NaiveDate>,
) -> WasteAnalysis {
    let mut analysis = WasteAnalysis::default();
    let mut dates = BTreeSet::new();
    let mut by_product: BTreeMap<FinishedGoodId, ProductWaste> = BTreeMap::new();
    let mut trend: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for count in counts {
        let CountedEntity::FinishedGood(good_id) = count.entity else {
            continue;
        };
        if since.is_some_and(|from| count.count_date < from) {
            continue;
        }

        let units = count.variance.variance_units;
        let cases = count.variance.variance_cases.unwrap_or(0.0);
        analysis.total_variance_units = analysis.total_variance_units.saturating_add(units);
        analysis.total_variance_cases += cases;
        dates.insert(count.count_date);
        *trend.entry(count.count_date).or_default() += cases;

        let product = by_product.entry(good_id).or_insert_with(|| ProductWaste {
            finished_good_id: good_id,
            total_variance_units: 0,
            count_events: 0,
        });
        product.total_variance_units = product.total_variance_units.saturating_add(units);
        product.count_events += 1;
    }

    analysis.count_dates = dates.len();
    analysis.products = by_product.into_values().collect();
    analysis.products.sort_by_key(|p| p.total_variance_units);
    analysis.trend = trend.into_iter().collect();
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillhouse_core::{EngineConfig, LedgerItemId};
    use stillhouse_products::{FinishedGood, NewFinishedGood, StockCounts};

    use crate::physical_count::{CountRequest, count_finished_good};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn good(name: &str, stock: StockCounts) -> FinishedGood {
        FinishedGood::create(
            NewFinishedGood::named(name).with_stock(stock),
            &EngineConfig::default(),
        )
        .unwrap()
    }

    fn count(good: &FinishedGood, actual: StockCounts, day: u32) -> PhysicalCount {
        count_finished_good(
            good,
            actual,
            &CountRequest::record_only(date(day)),
            &EngineConfig::default(),
        )
        .unwrap()
        .record
    }

    #[test]
    fn aggregates_by_product_and_date() {
        let paloma = good("Paloma", StockCounts::new(0, 10, 0));
        let mule = good("Mule", StockCounts::new(48, 0, 0));
        let history = vec![
            count(&paloma, StockCounts::new(0, 9, 0), 1),
            count(&mule, StockCounts::new(36, 0, 0), 1),
            count(&paloma, StockCounts::new(12, 9, 0), 15),
        ];

        let analysis = analyze_waste(&history, None);
        assert_eq!(analysis.total_variance_units, -24 - 12 - 12);
        assert!((analysis.total_variance_cases - -2.0).abs() < 1e-12);
        assert_eq!(analysis.count_dates, 2);
        assert!((analysis.average_variance_cases_per_count() - -1.0).abs() < 1e-12);

        assert_eq!(analysis.products.len(), 2);
        let worst = &analysis.products[0];
        assert_eq!(worst.finished_good_id, paloma.id_typed());
        assert_eq!(worst.total_variance_units, -36);
        assert_eq!(worst.count_events, 2);
        assert!((worst.average_variance_units() - -18.0).abs() < 1e-12);

        assert_eq!(analysis.trend, vec![(date(1), -1.5), (date(15), -0.5)]);
    }

    #[test]
    fn period_filter_and_ledger_counts_are_excluded() {
        let paloma = good("Paloma", StockCounts::new(0, 10, 0));
        let mut ledger_line = count(&paloma, StockCounts::new(0, 0, 0), 20);
        ledger_line.entity = CountedEntity::LedgerItem(LedgerItemId::new());
        let history = vec![
            count(&paloma, StockCounts::new(0, 9, 0), 1),
            count(&paloma, StockCounts::new(0, 11, 0), 15),
            ledger_line,
        ];

        let analysis = analyze_waste(&history, Some(date(10)));
        assert_eq!(analysis.total_variance_units, 24);
        assert_eq!(analysis.count_dates, 1);
        assert_eq!(analysis.products.len(), 1);
    }

    #[test]
    fn empty_history_reports_zero() {
        let analysis = analyze_waste(&[], None);
        assert_eq!(analysis, WasteAnalysis::default());
        assert_eq!(analysis.average_variance_cases_per_count(), 0.0);
    }
}
