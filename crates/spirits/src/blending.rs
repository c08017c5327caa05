//! Batch blending: spirit weight in, batch volume out.
//!
//! All availability checks run before anything is depleted, so an error
//! leaves every input untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::error::ensure_non_negative;
use stillhouse_core::units::{proof_from_abv, proof_gallons, volume_from_weight};
use stillhouse_core::{
    BatchId, BulkSpiritId, DomainError, DomainResult, EngineConfig, EntryId, Outcome, Warning,
};

use crate::batch::Batch;
use crate::bulk_spirit::BulkSpirit;
use crate::recipe::{BatchRecipe, validate_batch_recipe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendRequest {
    pub weight_to_produce_lbs: f64,
    pub production_date: NaiveDate,
    pub notes: String,
}

impl BlendRequest {
    pub fn new(weight_to_produce_lbs: f64, production_date: NaiveDate) -> Self {
        Self {
            weight_to_produce_lbs,
            production_date,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// One spirit drawn down by a blend, with its post-depletion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritDepletion {
    pub bulk_spirit_id: BulkSpiritId,
    pub depleted_lbs: f64,
    pub updated: BulkSpirit,
}

/// Immutable record of one batch production run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProductionLog {
    pub id: EntryId,
    pub production_date: NaiveDate,
    pub batch_id: BatchId,
    pub batch_name: String,
    pub weight_produced_lbs: f64,
    pub gallons_produced: f64,
    pub abv: f64,
    pub proof_gallons: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendResult {
    pub batch_abv: f64,
    pub volume_produced: f64,
    pub proof_gallons_produced: f64,
    pub spirit_depletions: Vec<SpiritDepletion>,
    pub updated_batch: Batch,
    pub log_entry: BatchProductionLog,
}

/// ABV of a blend from `(ingredient_weight_lbs, abv)` pairs.
///
/// Alcohol weight is taken as `ingredient_weight × abv / 100` and divided by
/// the total blend weight. Returns 0 for a non-positive total.
pub fn blend_abv(total_weight_lbs: f64, contributions: &[(f64, f64)]) -> f64 {
    if total_weight_lbs <= 0.0 {
        return 0.0;
    }
    let alcohol: f64 = contributions
        .iter()
        .map(|(weight, abv)| weight * abv / 100.0)
        .sum();
    alcohol / total_weight_lbs * 100.0
}

struct PlannedDraw<'a> {
    spirit: &'a BulkSpirit,
    required_lbs: f64,
}

/// Produce `request.weight_to_produce_lbs` of `batch` from its recipe.
///
/// Rows naming a spirit absent from `spirits` contribute nothing and are
/// reported as [`Warning::MissingSpirit`]. A spirit named by several rows is
/// checked against the sum of its draws.
pub fn blend_batch(
    batch: &Batch,
    recipe: &[BatchRecipe],
    spirits: &[BulkSpirit],
    request: &BlendRequest,
    cfg: &EngineConfig,
) -> DomainResult<Outcome<BlendResult>> {
    let weight = request.weight_to_produce_lbs;
    ensure_non_negative("weight to produce", weight)?;
    if weight == 0.0 {
        return Err(DomainError::validation("weight to produce must be positive"));
    }
    validate_batch_recipe(batch.id_typed(), recipe, cfg.recipe_tolerance_pct)?;

    let mut warnings = Vec::new();
    let mut draws: Vec<PlannedDraw<'_>> = Vec::new();
    let mut contributions = Vec::new();

    for row in recipe {
        let Some(spirit_id) = row.bulk_spirit_id else {
            continue;
        };
        let Some(spirit) = spirits.iter().find(|s| s.id_typed() == spirit_id) else {
            warnings.push(Warning::MissingSpirit {
                bulk_spirit_id: spirit_id,
                ingredient_name: row.ingredient_name.clone(),
            });
            continue;
        };

        let ingredient_lbs = weight * row.percentage / 100.0;
        contributions.push((ingredient_lbs, spirit.abv()));
        match draws.iter_mut().find(|d| d.spirit.id_typed() == spirit_id) {
            Some(draw) => draw.required_lbs += ingredient_lbs,
            None => draws.push(PlannedDraw {
                spirit,
                required_lbs: ingredient_lbs,
            }),
        }
    }

    for draw in &draws {
        if draw.spirit.weight_lbs() < draw.required_lbs {
            return Err(DomainError::feasibility(
                draw.spirit.name(),
                draw.required_lbs,
                draw.spirit.weight_lbs(),
            ));
        }
    }

    let batch_abv = blend_abv(weight, &contributions);
    let volume_produced = volume_from_weight(weight, batch_abv);
    let proof_gallons_produced = proof_gallons(volume_produced, proof_from_abv(batch_abv));

    let spirit_depletions = draws
        .iter()
        .map(|draw| SpiritDepletion {
            bulk_spirit_id: draw.spirit.id_typed(),
            depleted_lbs: draw.required_lbs,
            updated: draw.spirit.deplete(draw.required_lbs),
        })
        .collect();

    let updated_batch = batch.absorb_run(weight, batch_abv);

    let log_entry = BatchProductionLog {
        id: EntryId::new(),
        production_date: request.production_date,
        batch_id: batch.id_typed(),
        batch_name: batch.name().to_string(),
        weight_produced_lbs: weight,
        gallons_produced: volume_produced,
        abv: batch_abv,
        proof_gallons: proof_gallons_produced,
        notes: request.notes.clone(),
    };

    Ok(Outcome::with_warnings(
        BlendResult {
            batch_abv,
            volume_produced,
            proof_gallons_produced,
            spirit_depletions,
            updated_batch,
            log_entry,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk_spirit::{SpiritQuantity, SpiritReceipt};
    use proptest::prelude::*;
    use stillhouse_core::units::density;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn test_spirit(name: &str, lbs: f64, abv: f64) -> BulkSpirit {
        let receipt = SpiritReceipt::new(test_date(), SpiritQuantity::Weight(lbs), abv);
        BulkSpirit::receive_new(BulkSpiritId::new(), name, &receipt)
            .unwrap()
            .0
    }

    fn test_batch() -> Batch {
        Batch::create(BatchId::new(), "Mule Batch", 25.0).unwrap()
    }

    #[test]
    fn blend_example_yields_expected_abv() {
        let batch = test_batch();
        let rum = test_spirit("Rum", 500.0, 48.0);
        let water = test_spirit("Proofing Water", 500.0, 0.0);
        let recipe = vec![
            BatchRecipe::spirit(batch.id_typed(), rum.id_typed(), "Rum", 60.0),
            BatchRecipe::spirit(batch.id_typed(), water.id_typed(), "Water", 40.0),
        ];

        let outcome = blend_batch(
            &batch,
            &recipe,
            &[rum.clone(), water.clone()],
            &BlendRequest::new(100.0, test_date()),
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(outcome.is_clean());
        let result = outcome.value;
        assert!((result.batch_abv - 28.8).abs() < 1e-9);
        assert!((result.volume_produced - 100.0 / density(28.8)).abs() < 1e-9);
        assert!((result.proof_gallons_produced - result.volume_produced * 0.576).abs() < 1e-9);

        assert_eq!(result.spirit_depletions.len(), 2);
        let rum_after = &result.spirit_depletions[0];
        assert_eq!(rum_after.bulk_spirit_id, rum.id_typed());
        assert!((rum_after.depleted_lbs - 60.0).abs() < 1e-9);
        assert!((rum_after.updated.weight_lbs() - 440.0).abs() < 1e-9);

        assert!((result.updated_batch.abv() - 28.8).abs() < 1e-9);
        assert!((result.updated_batch.gallons() - result.volume_produced).abs() < 1e-9);
        assert_eq!(result.log_entry.batch_id, batch.id_typed());
    }

    #[test]
    fn non_alcoholic_rows_only_add_weight() {
        let batch = test_batch();
        let vodka = test_spirit("Vodka", 200.0, 40.0);
        let recipe = vec![
            BatchRecipe::spirit(batch.id_typed(), vodka.id_typed(), "Vodka", 50.0),
            BatchRecipe::other(batch.id_typed(), "Ginger Syrup", 50.0),
        ];

        let result = blend_batch(
            &batch,
            &recipe,
            &[vodka],
            &BlendRequest::new(80.0, test_date()),
            &EngineConfig::default(),
        )
        .unwrap()
        .value;

        assert!((result.batch_abv - 20.0).abs() < 1e-9);
        assert_eq!(result.spirit_depletions.len(), 1);
    }

    #[test]
    fn shortfall_names_the_spirit_and_changes_nothing() {
        let batch = test_batch();
        let gin = test_spirit("Gin", 30.0, 45.0);
        let recipe = vec![
            BatchRecipe::spirit(batch.id_typed(), gin.id_typed(), "Gin", 50.0),
            BatchRecipe::other(batch.id_typed(), "Lime", 50.0),
        ];
        let spirits = vec![gin.clone()];

        let err = blend_batch(
            &batch,
            &recipe,
            &spirits,
            &BlendRequest::new(100.0, test_date()),
            &EngineConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, DomainError::feasibility("Gin", 50.0, 30.0));
        assert_eq!(spirits[0], gin);
        assert!((spirits[0].weight_lbs() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn missing_spirit_is_a_warning() {
        let batch = test_batch();
        let ghost = BulkSpiritId::new();
        let recipe = vec![
            BatchRecipe::spirit(batch.id_typed(), ghost, "Retired Whiskey", 30.0),
            BatchRecipe::other(batch.id_typed(), "Water", 70.0),
        ];

        let outcome = blend_batch(
            &batch,
            &recipe,
            &[],
            &BlendRequest::new(50.0, test_date()),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.value.batch_abv, 0.0);
        assert!(outcome.value.spirit_depletions.is_empty());
        assert_eq!(
            outcome.warnings,
            vec![Warning::MissingSpirit {
                bulk_spirit_id: ghost,
                ingredient_name: "Retired Whiskey".to_string(),
            }]
        );
    }

    #[test]
    fn rejects_bad_weight_and_recipe() {
        let batch = test_batch();
        let recipe = vec![BatchRecipe::other(batch.id_typed(), "Water", 100.0)];
        let cfg = EngineConfig::default();

        let zero = blend_batch(&batch, &recipe, &[], &BlendRequest::new(0.0, test_date()), &cfg);
        assert!(matches!(zero, Err(DomainError::Validation(_))));

        let partial = vec![BatchRecipe::other(batch.id_typed(), "Water", 90.0)];
        let short = blend_batch(&batch, &partial, &[], &BlendRequest::new(10.0, test_date()), &cfg);
        assert!(matches!(short, Err(DomainError::Validation(_))));
    }

    #[test]
    fn repeated_spirit_is_checked_in_aggregate() {
        let batch = test_batch();
        let gin = test_spirit("Gin", 70.0, 40.0);
        let recipe = vec![
            BatchRecipe::spirit(batch.id_typed(), gin.id_typed(), "Gin", 40.0),
            BatchRecipe::spirit(batch.id_typed(), gin.id_typed(), "Gin (top-up)", 40.0),
            BatchRecipe::other(batch.id_typed(), "Tonic", 20.0),
        ];

        let err = blend_batch(
            &batch,
            &recipe,
            &[gin],
            &BlendRequest::new(100.0, test_date()),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Feasibility { .. }));
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        /// Property: blend ABV never exceeds the strongest spirit in the recipe.
        #[test]
        fn blend_abv_bounded_by_strongest_spirit(
            share in 0.0f64..=100.0,
            abv_a in 0.0f64..=100.0,
            abv_b in 0.0f64..=100.0,
            weight in 1.0f64..1000.0,
        ) {
            let contributions = [
                (weight * share / 100.0, abv_a),
                (weight * (100.0 - share) / 100.0, abv_b),
            ];
            let abv = blend_abv(weight, &contributions);
            prop_assert!(abv <= abv_a.max(abv_b) + 1e-9);
            prop_assert!(abv >= 0.0);
        }
    }
}
