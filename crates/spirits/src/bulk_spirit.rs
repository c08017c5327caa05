use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stillhouse_core::error::{ensure_abv, ensure_non_negative};
use stillhouse_core::units::{density, proof_gallons, volume_from_weight, weight_from_volume};
use stillhouse_core::{BulkSpiritId, DomainError, DomainResult, Entity, EntryId};

/// How a received quantity was measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum SpiritQuantity {
    /// Pounds on the scale (preferred for mixed alcohol).
    Weight(f64),
    /// Wine gallons.
    Volume(f64),
}

impl SpiritQuantity {
    /// The quantity in pounds at `abv`.
    pub fn weight_lbs(self, abv: f64) -> f64 {
        match self {
            SpiritQuantity::Weight(lbs) => lbs,
            SpiritQuantity::Volume(gallons) => weight_from_volume(gallons, abv),
        }
    }

    fn raw(self) -> f64 {
        match self {
            SpiritQuantity::Weight(v) | SpiritQuantity::Volume(v) => v,
        }
    }
}

/// A delivery of bulk spirit as entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritReceipt {
    pub receipt_date: NaiveDate,
    pub quantity: SpiritQuantity,
    pub abv: f64,
    /// Supplier-stated proof; defaults to `trunc(abv × 2)`.
    pub proof: Option<i64>,
    pub supplier: Option<String>,
    pub batch_number: Option<String>,
    pub notes: String,
}

impl SpiritReceipt {
    pub fn new(receipt_date: NaiveDate, quantity: SpiritQuantity, abv: f64) -> Self {
        Self {
            receipt_date,
            quantity,
            abv,
            proof: None,
            supplier: None,
            batch_number: None,
            notes: String::new(),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        ensure_abv(self.abv)?;
        let raw = self.quantity.raw();
        ensure_non_negative("received quantity", raw)?;
        if raw == 0.0 {
            return Err(DomainError::validation("received quantity must be positive"));
        }
        if let Some(proof) = self.proof {
            if !(0..=200).contains(&proof) {
                return Err(DomainError::validation(format!(
                    "proof must be within 0..=200, got {proof}"
                )));
            }
        }
        Ok(())
    }

    fn proof_or_default(&self) -> i64 {
        self.proof.unwrap_or_else(|| proof_for(self.abv))
    }
}

/// Immutable receipt log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSpiritReceipt {
    pub id: EntryId,
    pub bulk_spirit_id: BulkSpiritId,
    pub receipt_date: NaiveDate,
    pub weight_lbs: f64,
    pub wine_gallons: f64,
    pub abv: f64,
    pub proof: i64,
    pub supplier: Option<String>,
    pub batch_number: Option<String>,
    pub notes: String,
}

/// Integer proof for an ABV, truncated like the stored proof column.
fn proof_for(abv: f64) -> i64 {
    (abv * 2.0).trunc() as i64
}

/// Received, un-blended spirit tracked by weight.
///
/// Invariant: `wine_gallons == weight_lbs / density(abv)` and
/// `proof_gallons == wine_gallons × proof / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSpirit {
    id: BulkSpiritId,
    name: String,
    proof: i64,
    abv: f64,
    weight_lbs: f64,
    wine_gallons: f64,
    proof_gallons: f64,
    density_lbs_per_gal: f64,
    revision: u64,
}

impl BulkSpirit {
    /// Create a spirit from its first receipt.
    pub fn receive_new(
        id: BulkSpiritId,
        name: impl Into<String>,
        receipt: &SpiritReceipt,
    ) -> DomainResult<(Self, BulkSpiritReceipt)> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("spirit name cannot be empty"));
        }
        receipt.validate()?;

        let mut spirit = Self {
            id,
            name,
            proof: receipt.proof_or_default(),
            abv: receipt.abv,
            weight_lbs: receipt.quantity.weight_lbs(receipt.abv),
            wine_gallons: 0.0,
            proof_gallons: 0.0,
            density_lbs_per_gal: 0.0,
            revision: 0,
        };
        spirit.recompute();
        let log = spirit.receipt_entry(receipt);
        Ok((spirit, log))
    }

    /// Add a further delivery to existing stock.
    ///
    /// The spirit keeps its own ABV and proof; the receipt log records the
    /// delivery's own figures.
    pub fn receive(&self, receipt: &SpiritReceipt) -> DomainResult<(Self, BulkSpiritReceipt)> {
        receipt.validate()?;
        let mut next = self.clone();
        next.weight_lbs += receipt.quantity.weight_lbs(receipt.abv);
        next.recompute();
        let log = next.receipt_entry(receipt);
        Ok((next, log))
    }

    fn receipt_entry(&self, receipt: &SpiritReceipt) -> BulkSpiritReceipt {
        let weight_lbs = receipt.quantity.weight_lbs(receipt.abv);
        BulkSpiritReceipt {
            id: EntryId::new(),
            bulk_spirit_id: self.id,
            receipt_date: receipt.receipt_date,
            weight_lbs,
            wine_gallons: volume_from_weight(weight_lbs, receipt.abv),
            abv: receipt.abv,
            proof: receipt.proof_or_default(),
            supplier: receipt.supplier.clone(),
            batch_number: receipt.batch_number.clone(),
            notes: receipt.notes.clone(),
        }
    }

    /// Manual correction of weight and ABV; proof is re-derived from ABV.
    pub fn edit(&self, name: Option<&str>, weight_lbs: f64, abv: f64) -> DomainResult<Self> {
        ensure_abv(abv)?;
        ensure_non_negative("weight", weight_lbs)?;
        let mut next = self.clone();
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("spirit name cannot be empty"));
            }
            next.name = name.to_string();
        }
        next.weight_lbs = weight_lbs;
        next.abv = abv;
        next.proof = proof_for(abv);
        next.recompute();
        Ok(next)
    }

    /// Remove `weight_lbs` for a blend. Availability is checked by the caller.
    pub fn deplete(&self, weight_lbs: f64) -> Self {
        let mut next = self.clone();
        next.weight_lbs -= weight_lbs;
        next.recompute();
        next
    }

    fn recompute(&mut self) {
        self.density_lbs_per_gal = density(self.abv);
        self.wine_gallons = volume_from_weight(self.weight_lbs, self.abv);
        self.proof_gallons = proof_gallons(self.wine_gallons, self.proof as f64);
    }

    pub fn id_typed(&self) -> BulkSpiritId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn proof(&self) -> i64 {
        self.proof
    }

    pub fn abv(&self) -> f64 {
        self.abv
    }

    pub fn weight_lbs(&self) -> f64 {
        self.weight_lbs
    }

    pub fn wine_gallons(&self) -> f64 {
        self.wine_gallons
    }

    pub fn proof_gallons(&self) -> f64 {
        self.proof_gallons
    }

    pub fn density_lbs_per_gal(&self) -> f64 {
        self.density_lbs_per_gal
    }
}

impl Entity for BulkSpirit {
    type Id = BulkSpiritId;

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

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn vodka(lbs: f64) -> BulkSpirit {
        let receipt = SpiritReceipt::new(date(), SpiritQuantity::Weight(lbs), 50.0);
        BulkSpirit::receive_new(BulkSpiritId::new(), "Vodka 100 Proof", &receipt)
            .unwrap()
            .0
    }

    #[test]
    fn receipt_by_weight_derives_volume_and_proof_gallons() {
        let spirit = vodka(400.0);
        let d = density(50.0);
        assert_eq!(spirit.proof(), 100);
        assert!((spirit.density_lbs_per_gal() - d).abs() < 1e-12);
        assert!((spirit.wine_gallons() - 400.0 / d).abs() < 1e-9);
        assert!((spirit.proof_gallons() - 400.0 / d).abs() < 1e-9);
    }

    #[test]
    fn receipt_by_volume_converts_to_weight() {
        let receipt = SpiritReceipt::new(date(), SpiritQuantity::Volume(53.0), 40.0);
        let (spirit, log) =
            BulkSpirit::receive_new(BulkSpiritId::new(), "Gin", &receipt).unwrap();
        assert!((spirit.weight_lbs() - 53.0 * density(40.0)).abs() < 1e-9);
        assert!((spirit.wine_gallons() - 53.0).abs() < 1e-9);
        assert_eq!(log.proof, 80);
        assert_eq!(log.bulk_spirit_id, spirit.id_typed());
    }

    #[test]
    fn receive_is_additive() {
        let spirit = vodka(100.0);
        let more = SpiritReceipt::new(date(), SpiritQuantity::Weight(50.0), 50.0);
        let (next, log) = spirit.receive(&more).unwrap();
        assert!((next.weight_lbs() - 150.0).abs() < 1e-12);
        assert!((log.weight_lbs - 50.0).abs() < 1e-12);
        assert!(next.wine_gallons() > spirit.wine_gallons());
    }

    #[test]
    fn receipt_rejects_bad_input() {
        let zero = SpiritReceipt::new(date(), SpiritQuantity::Weight(0.0), 40.0);
        assert!(BulkSpirit::receive_new(BulkSpiritId::new(), "Rum", &zero).is_err());

        let strong = SpiritReceipt::new(date(), SpiritQuantity::Weight(10.0), 140.0);
        assert!(BulkSpirit::receive_new(BulkSpiritId::new(), "Rum", &strong).is_err());

        let ok = SpiritReceipt::new(date(), SpiritQuantity::Weight(10.0), 40.0);
        assert!(BulkSpirit::receive_new(BulkSpiritId::new(), "", &ok).is_err());
    }

    #[test]
    fn edit_rederives_proof_from_abv() {
        let spirit = vodka(100.0).edit(None, 80.0, 40.25).unwrap();
        assert_eq!(spirit.proof(), 80);
        assert!((spirit.wine_gallons() - 80.0 / density(40.25)).abs() < 1e-9);
        assert!((spirit.proof_gallons() - spirit.wine_gallons() * 0.8).abs() < 1e-9);
    }

    #[test]
    fn deplete_recomputes_at_own_abv() {
        let spirit = vodka(100.0).deplete(60.0);
        assert!((spirit.weight_lbs() - 40.0).abs() < 1e-12);
        assert!((spirit.wine_gallons() - 40.0 / density(50.0)).abs() < 1e-9);
    }
}
