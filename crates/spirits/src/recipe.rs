use serde::{Deserialize, Serialize};

use stillhouse_core::{BatchId, BulkSpiritId, DomainError, DomainResult};

/// One ingredient of a batch, as a share of total batch weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecipe {
    pub batch_id: BatchId,
    /// `None` marks a non-alcoholic ingredient (juice, syrup, water).
    pub bulk_spirit_id: Option<BulkSpiritId>,
    pub ingredient_name: String,
    /// Percent of total batch weight, 0..=100.
    pub percentage: f64,
}

impl BatchRecipe {
    pub fn spirit(
        batch_id: BatchId,
        bulk_spirit_id: BulkSpiritId,
        ingredient_name: impl Into<String>,
        percentage: f64,
    ) -> Self {
        Self {
            batch_id,
            bulk_spirit_id: Some(bulk_spirit_id),
            ingredient_name: ingredient_name.into(),
            percentage,
        }
    }

    pub fn other(batch_id: BatchId, ingredient_name: impl Into<String>, percentage: f64) -> Self {
        Self {
            batch_id,
            bulk_spirit_id: None,
            ingredient_name: ingredient_name.into(),
            percentage,
        }
    }
}

pub fn recipe_total(rows: &[BatchRecipe]) -> f64 {
    rows.iter().map(|r| r.percentage).sum()
}

/// A recipe is usable when all rows belong to `batch_id`, each share is in
/// `0..=100`, and the shares sum to 100 within `tolerance_pct`.
pub fn validate_batch_recipe(
    batch_id: BatchId,
    rows: &[BatchRecipe],
    tolerance_pct: f64,
) -> DomainResult<()> {
    if rows.is_empty() {
        return Err(DomainError::validation("batch has no recipe configured"));
    }
    for row in rows {
        if row.batch_id != batch_id {
            return Err(DomainError::validation(format!(
                "recipe row {} belongs to another batch",
                row.ingredient_name
            )));
        }
        if !(0.0..=100.0).contains(&row.percentage) {
            return Err(DomainError::validation(format!(
                "{} share must be within 0..=100, got {}",
                row.ingredient_name, row.percentage
            )));
        }
    }

    let total = recipe_total(rows);
    if (total - 100.0).abs() >= tolerance_pct {
        return Err(DomainError::validation(format!(
            "recipe must total 100%, got {total:.1}%"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_recipe_within_tolerance() {
        let batch = BatchId::new();
        let rows = vec![
            BatchRecipe::spirit(batch, BulkSpiritId::new(), "Gin", 33.35),
            BatchRecipe::other(batch, "Lime Juice", 33.3),
            BatchRecipe::other(batch, "Simple Syrup", 33.3),
        ];
        assert!(validate_batch_recipe(batch, &rows, 0.1).is_ok());
    }

    #[test]
    fn rejects_short_or_over_recipes() {
        let batch = BatchId::new();
        let short = vec![BatchRecipe::other(batch, "Water", 99.8)];
        assert!(validate_batch_recipe(batch, &short, 0.1).is_err());

        let over = vec![
            BatchRecipe::other(batch, "Water", 60.0),
            BatchRecipe::other(batch, "Syrup", 41.0),
        ];
        assert!(validate_batch_recipe(batch, &over, 0.1).is_err());
    }

    #[test]
    fn rejects_empty_and_foreign_rows() {
        let batch = BatchId::new();
        assert!(validate_batch_recipe(batch, &[], 0.1).is_err());

        let foreign = vec![BatchRecipe::other(BatchId::new(), "Water", 100.0)];
        assert!(validate_batch_recipe(batch, &foreign, 0.1).is_err());
    }
}
