//! Engine configuration from the environment.

use anyhow::{Context, ensure};
use stillhouse_core::EngineConfig;

pub const EXCISE_TAX_RATE_VAR: &str = "STILLHOUSE_EXCISE_TAX_RATE";
pub const GALLONS_PER_CASE_VAR: &str = "STILLHOUSE_GALLONS_PER_CASE";
pub const UNITS_PER_CASE_VAR: &str = "STILLHOUSE_UNITS_PER_CASE";
pub const RECIPE_TOLERANCE_VAR: &str = "STILLHOUSE_RECIPE_TOLERANCE_PCT";

/// Load [`EngineConfig`] from `STILLHOUSE_*` variables.
///
/// Unset variables fall back to the defaults; malformed or non-positive
/// values are errors.
pub fn load_from_env() -> anyhow::Result<EngineConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Same as [`load_from_env`] with an injectable lookup.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<EngineConfig> {
    let defaults = EngineConfig::default();

    let config = EngineConfig {
        excise_tax_rate: read_var(&lookup, EXCISE_TAX_RATE_VAR, defaults.excise_tax_rate)?,
        gallons_per_case: read_var(&lookup, GALLONS_PER_CASE_VAR, defaults.gallons_per_case)?,
        units_per_case: read_var(&lookup, UNITS_PER_CASE_VAR, defaults.units_per_case)?,
        recipe_tolerance_pct: read_var(
            &lookup,
            RECIPE_TOLERANCE_VAR,
            defaults.recipe_tolerance_pct,
        )?,
    };

    ensure!(
        config.excise_tax_rate >= 0.0,
        "{EXCISE_TAX_RATE_VAR} cannot be negative"
    );
    ensure!(
        config.gallons_per_case > 0.0,
        "{GALLONS_PER_CASE_VAR} must be positive"
    );
    ensure!(config.units_per_case > 0, "{UNITS_PER_CASE_VAR} must be positive");
    ensure!(
        config.recipe_tolerance_pct > 0.0,
        "{RECIPE_TOLERANCE_VAR} must be positive"
    );

    Ok(config)
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => {
            tracing::warn!("{key} not set, using default {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = load_with(lookup_from(&[
            (EXCISE_TAX_RATE_VAR, "2.70"),
            (UNITS_PER_CASE_VAR, " 12 "),
        ]))
        .unwrap();
        assert_eq!(config.excise_tax_rate, 2.70);
        assert_eq!(config.units_per_case, 12);
        assert_eq!(config.gallons_per_case, EngineConfig::DEFAULT_GALLONS_PER_CASE);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = load_with(lookup_from(&[(GALLONS_PER_CASE_VAR, "lots")])).unwrap_err();
        assert!(err.to_string().contains(GALLONS_PER_CASE_VAR));

        assert!(load_with(lookup_from(&[(UNITS_PER_CASE_VAR, "0")])).is_err());
        assert!(load_with(lookup_from(&[(EXCISE_TAX_RATE_VAR, "-1")])).is_err());
    }
}
