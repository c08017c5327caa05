use thiserror::Error;

use stillhouse_core::DomainError;

use crate::store::StoreError;

/// Errors surfaced by [`crate::Distillery`] operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A store write failed after earlier writes of the same operation landed.
    #[error("operation partially applied after {completed:?}: {source}")]
    PartiallyApplied {
        completed: Vec<String>,
        #[source]
        source: StoreError,
    },

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Tracks the writes of one operation so a late failure reports what landed.
#[derive(Debug, Default)]
pub(crate) struct WriteSteps {
    completed: Vec<String>,
}

impl WriteSteps {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record<T>(
        &mut self,
        step: impl Into<String>,
        result: Result<T, StoreError>,
    ) -> EngineResult<T> {
        match result {
            Ok(value) => {
                self.completed.push(step.into());
                Ok(value)
            }
            Err(source) if self.completed.is_empty() => Err(EngineError::Store(source)),
            Err(source) => Err(EngineError::PartiallyApplied {
                completed: self.completed.clone(),
                source,
            }),
        }
    }
}
