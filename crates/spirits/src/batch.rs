use serde::{Deserialize, Serialize};

use stillhouse_core::error::{ensure_abv, ensure_non_negative};
use stillhouse_core::units::{proof_from_abv, proof_gallons, volume_from_weight, weight_from_volume};
use stillhouse_core::{BatchId, DomainError, DomainResult, Entity};

/// A blended bulk batch type and its cumulative stock.
///
/// `ending = gallons - bottled_gallons`; `proof_gallons` is taken on the
/// ending volume and is zero when either ending or ABV is not positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    id: BatchId,
    name: String,
    gallons: f64,
    bottled_gallons: f64,
    ending: f64,
    abv: f64,
    proof_gallons: f64,
    revision: u64,
}

impl Batch {
    /// New, empty batch type with an approximate target ABV.
    pub fn create(id: BatchId, name: impl Into<String>, target_abv: f64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("batch name cannot be empty"));
        }
        ensure_abv(target_abv)?;
        let mut batch = Self {
            id,
            name,
            gallons: 0.0,
            bottled_gallons: 0.0,
            ending: 0.0,
            abv: target_abv,
            proof_gallons: 0.0,
            revision: 0,
        };
        batch.recompute();
        Ok(batch)
    }

    /// Manual correction of the batch inventory row.
    pub fn edit(
        &self,
        name: Option<&str>,
        gallons: f64,
        bottled_gallons: f64,
        abv: f64,
    ) -> DomainResult<Self> {
        ensure_non_negative("gallons", gallons)?;
        ensure_non_negative("bottled gallons", bottled_gallons)?;
        ensure_abv(abv)?;
        let mut next = self.clone();
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("batch name cannot be empty"));
            }
            next.name = name.to_string();
        }
        next.gallons = gallons;
        next.bottled_gallons = bottled_gallons;
        next.abv = abv;
        next.recompute();
        Ok(next)
    }

    /// Fold a production run into the cumulative volume.
    ///
    /// The prior volume is converted to weight at the prior ABV, the new weight
    /// added, and the total converted back at `run_abv`. The batch ABV is
    /// re-based to `run_abv` rather than averaged across runs.
    pub(crate) fn absorb_run(&self, weight_lbs: f64, run_abv: f64) -> Self {
        let prior_weight = weight_from_volume(self.gallons, self.abv);
        let mut next = self.clone();
        next.gallons = volume_from_weight(prior_weight + weight_lbs, run_abv);
        next.abv = run_abv;
        next.recompute();
        next
    }

    fn recompute(&mut self) {
        self.ending = self.gallons - self.bottled_gallons;
        self.proof_gallons = if self.ending > 0.0 && self.abv > 0.0 {
            proof_gallons(self.ending, proof_from_abv(self.abv))
        } else {
            0.0
        };
    }

    pub fn id_typed(&self) -> BatchId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gallons(&self) -> f64 {
        self.gallons
    }

    pub fn bottled_gallons(&self) -> f64 {
        self.bottled_gallons
    }

    pub fn ending(&self) -> f64 {
        self.ending
    }

    pub fn abv(&self) -> f64 {
        self.abv
    }

    pub fn proof_gallons(&self) -> f64 {
        self.proof_gallons
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}
