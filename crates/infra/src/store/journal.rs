use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;

/// A record appended to a journal, with its assigned position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry<T> {
    /// Monotonically increasing, starting at 1.
    pub sequence_number: u64,
    pub recorded_at: DateTime<Utc>,
    pub record: T,
}

/// In-memory append-only log for immutable history (receipts, production
/// logs, counts, snapshots). Entries are never updated or removed.
#[derive(Debug)]
pub struct Journal<T> {
    entries: RwLock<Vec<JournalEntry<T>>>,
}

impl<T> Default for Journal<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone> Journal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: T) -> Result<JournalEntry<T>, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let sequence_number = entries.last().map(|e| e.sequence_number).unwrap_or(0) + 1;
        let entry = JournalEntry {
            sequence_number,
            recorded_at: Utc::now(),
            record,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    pub fn entries(&self) -> Result<Vec<JournalEntry<T>>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }

    pub fn records(&self) -> Result<Vec<T>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.iter().map(|e| e.record.clone()).collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
