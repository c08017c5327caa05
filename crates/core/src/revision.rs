//! Optimistic revision checks for single-record writes.

use crate::error::{DomainError, DomainResult};

/// Optimistic concurrency expectation for a stored record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedRevision {
    /// Skip revision checking (initial seeding, migrations).
    Any,
    /// Require the stored record to be at an exact revision.
    Exact(u64),
}

impl ExpectedRevision {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedRevision::Any => true,
            ExpectedRevision::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "revision check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
