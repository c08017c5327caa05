//! Weight, volume, proof and tax conversions.
//!
//! All functions are total over their valid domain (ABV in `0..=100`,
//! non-negative quantities). Range checks happen once, at the entry point of
//! each engine operation, not here.

/// Density of pure ethanol, g/mL.
pub const ETHANOL_DENSITY_G_ML: f64 = 0.789;
/// Density of water, g/mL.
pub const WATER_DENSITY_G_ML: f64 = 1.0;
/// g/mL → lbs/gallon.
pub const G_ML_TO_LBS_PER_GAL: f64 = 8.345;

/// Density (lbs per wine gallon) of an ethanol–water mixture at `abv` percent.
///
/// Linear in the ABV fraction.
pub fn density(abv: f64) -> f64 {
    let fraction = abv / 100.0;
    let g_ml = fraction * ETHANOL_DENSITY_G_ML + (1.0 - fraction) * WATER_DENSITY_G_ML;
    g_ml * G_ML_TO_LBS_PER_GAL
}

/// Wine gallons held by `weight_lbs` of liquid at `abv`.
pub fn volume_from_weight(weight_lbs: f64, abv: f64) -> f64 {
    if weight_lbs == 0.0 {
        return 0.0;
    }
    weight_lbs / density(abv)
}

/// Weight (lbs) of `wine_gallons` of liquid at `abv`.
pub fn weight_from_volume(wine_gallons: f64, abv: f64) -> f64 {
    if wine_gallons == 0.0 {
        return 0.0;
    }
    wine_gallons * density(abv)
}

/// Proof gallons = wine gallons × proof / 100.
pub fn proof_gallons(wine_gallons: f64, proof: f64) -> f64 {
    wine_gallons * (proof / 100.0)
}

/// Excise tax owed on `proof_gallons` at `rate` per proof gallon.
pub fn excise_tax(proof_gallons: f64, rate: f64) -> f64 {
    proof_gallons * rate
}

/// Regulatory proof for an ABV (ABV × 2).
pub fn proof_from_abv(abv: f64) -> f64 {
    abv * 2.0
}
