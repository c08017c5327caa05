//! Finished-good metrics: case totals, proof gallons and excise tax.

use serde::{Deserialize, Serialize};

use stillhouse_core::EngineConfig;
use stillhouse_core::units::{excise_tax, proof_from_abv, proof_gallons};

/// Derived values persisted onto a finished good after every stock change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinishedGoodMetrics {
    /// Whole cases on hand (fractional leftover singles are not counted).
    pub current_stock: i64,
    pub proof_gallons: f64,
    pub excise_tax_due: f64,
}

/// Fractional case count of loose singles plus both bottled forms.
pub fn total_cases(singles: i64, bottled_s: i64, bottled_i: i64, units_per_case: i64) -> f64 {
    let upc = units_per_case as f64;
    (singles as f64 + (bottled_s as f64 + bottled_i as f64) * upc) / upc
}

/// Proof gallons and excise tax of `cases` cases at `abv`.
///
/// Both are zero when `abv` is not positive.
pub fn case_volume_tax(cases: f64, abv: f64, config: &EngineConfig) -> (f64, f64) {
    if abv <= 0.0 {
        return (0.0, 0.0);
    }
    let gallons = cases * config.gallons_per_case;
    let pg = proof_gallons(gallons, proof_from_abv(abv));
    (pg, excise_tax(pg, config.excise_tax_rate))
}

/// Derive `{current_stock, proof_gallons, excise_tax_due}` from raw stock fields.
///
/// Uses the engine's fixed units-per-case, not the product's own `case_size`.
pub fn derive_finished_good_metrics(
    singles: i64,
    bottled_s: i64,
    bottled_i: i64,
    abv: f64,
    config: &EngineConfig,
) -> FinishedGoodMetrics {
    let cases = total_cases(singles, bottled_s, bottled_i, config.units_per_case);
    let (proof_gallons, excise_tax_due) = case_volume_tax(cases, abv, config);
    FinishedGoodMetrics {
        // Truncation toward zero, like the displayed stock column.
        current_stock: cases.trunc() as i64,
        proof_gallons,
        excise_tax_due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derives_metrics_for_mixed_stock() {
        let cfg = EngineConfig::default();
        let m = derive_finished_good_metrics(164, 6, 13, 17.01, &cfg);

        let cases: f64 = (164.0 + 19.0 * 24.0) / 24.0;
        assert!((cases - 25.833_333).abs() < 1e-5);
        assert_eq!(m.current_stock, 25);

        let expected_pg = cases * 1.27 * (17.01 * 2.0) / 100.0;
        assert!((m.proof_gallons - expected_pg).abs() < 1e-9);
        assert!((m.proof_gallons - 11.1614).abs() < 1e-3);
        assert!((m.excise_tax_due - expected_pg * 13.50).abs() < 1e-9);
        assert!((m.excise_tax_due - 150.68).abs() < 1e-2);
    }

    #[test]
    fn non_alcoholic_goods_owe_nothing() {
        let cfg = EngineConfig::default();
        let m = derive_finished_good_metrics(48, 3, 0, 0.0, &cfg);
        assert_eq!(m.current_stock, 5);
        assert_eq!(m.proof_gallons, 0.0);
        assert_eq!(m.excise_tax_due, 0.0);
    }

    #[test]
    fn leftover_singles_do_not_count_as_a_case() {
        let cfg = EngineConfig::default();
        assert_eq!(derive_finished_good_metrics(23, 0, 0, 10.0, &cfg).current_stock, 0);
        assert_eq!(derive_finished_good_metrics(24, 0, 0, 10.0, &cfg).current_stock, 1);
    }

    #[test]
    fn excise_rate_comes_from_config() {
        let cfg = EngineConfig {
            excise_tax_rate: 2.70,
            ..EngineConfig::default()
        };
        let (pg, tax) = case_volume_tax(10.0, 40.0, &cfg);
        assert!((pg - 10.0 * 1.27 * 0.8).abs() < 1e-9);
        assert!((tax - pg * 2.70).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn stock_is_whole_cases_of_total_units(
            singles in 0i64..10_000,
            s in 0i64..1_000,
            i in 0i64..1_000,
        ) {
            let cfg = EngineConfig::default();
            let m = derive_finished_good_metrics(singles, s, i, 0.0, &cfg);
            prop_assert_eq!(m.current_stock, (singles + (s + i) * 24) / 24);
        }
    }
}
