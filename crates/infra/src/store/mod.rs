//! Keyed row storage and append-only journals.
//!
//! The engine only needs keyed read/update for mutable records and ordered
//! append for history; both are provided in memory here.

pub mod journal;
pub mod row_store;

pub use journal::{Journal, JournalEntry};
pub use row_store::{InMemoryRowStore, RowStore};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("revision check failed: {0}")]
    Conflict(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Duplicate(String),

    #[error("store lock poisoned")]
    Poisoned,
}
