//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// feasibility, missing references). Store failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An input failed validation (negative quantity, ABV out of range, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Not enough bulk spirit on hand to blend the requested weight.
    #[error(
        "insufficient {ingredient}: {required_lbs:.2} lbs required, {available_lbs:.2} lbs available"
    )]
    Feasibility {
        ingredient: String,
        required_lbs: f64,
        available_lbs: f64,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record (finished good, batch, ...) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stale revision was written.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn feasibility(ingredient: impl Into<String>, required_lbs: f64, available_lbs: f64) -> Self {
        Self::Feasibility {
            ingredient: ingredient.into(),
            required_lbs,
            available_lbs,
        }
    }
}

/// Reject NaN and out-of-range ABV values at an operation boundary.
pub fn ensure_abv(abv: f64) -> DomainResult<()> {
    if !(0.0..=100.0).contains(&abv) {
        return Err(DomainError::validation(format!("abv must be within 0..=100, got {abv}")));
    }
    Ok(())
}

/// Reject negative, NaN and infinite quantities at an operation boundary.
pub fn ensure_non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be negative, got {value}")));
    }
    Ok(())
}

/// Unwrap a checked integer operation, naming the quantity that overflowed.
pub fn checked_units(field: &str, value: Option<i64>) -> DomainResult<i64> {
    value.ok_or_else(|| DomainError::validation(format!("{field} is out of range")))
}
