use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use stillhouse_core::{Entity, ExpectedRevision};

use super::StoreError;

/// Keyed store for mutable records.
///
/// Every accepted `insert`/`update` stamps the next revision on the stored
/// value and returns it; `update` rejects stale writes.
pub trait RowStore<V: Entity>: Send + Sync {
    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError>;
    fn insert(&self, value: V) -> Result<V, StoreError>;
    fn update(&self, value: V, expected: ExpectedRevision) -> Result<V, StoreError>;
    /// All records in key order.
    fn list(&self) -> Result<Vec<V>, StoreError>;
    fn remove(&self, id: &V::Id) -> Result<Option<V>, StoreError>;
}

impl<V, S> RowStore<V> for Arc<S>
where
    V: Entity,
    S: RowStore<V> + ?Sized,
{
    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).get(id)
    }

    fn insert(&self, value: V) -> Result<V, StoreError> {
        (**self).insert(value)
    }

    fn update(&self, value: V, expected: ExpectedRevision) -> Result<V, StoreError> {
        (**self).update(value, expected)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn remove(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).remove(id)
    }
}

/// In-memory row store for tests/dev and single-process use.
#[derive(Debug)]
pub struct InMemoryRowStore<V: Entity> {
    inner: RwLock<BTreeMap<V::Id, V>>,
}

impl<V: Entity> InMemoryRowStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<V: Entity> Default for InMemoryRowStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RowStore<V> for InMemoryRowStore<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Send + Sync,
{
    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn insert(&self, mut value: V) -> Result<V, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = value.id().clone();
        if map.contains_key(&id) {
            return Err(StoreError::Duplicate(format!("{id:?}")));
        }
        value.set_revision(1);
        map.insert(id, value.clone());
        Ok(value)
    }

    fn update(&self, mut value: V, expected: ExpectedRevision) -> Result<V, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = value.id().clone();
        let current = map
            .get(&id)
            .map(|v| v.revision())
            .ok_or_else(|| StoreError::NotFound(format!("{id:?}")))?;

        if !expected.matches(current) {
            return Err(StoreError::Conflict(format!(
                "{id:?}: expected {expected:?}, found {current}"
            )));
        }

        value.set_revision(current + 1);
        map.insert(id, value.clone());
        Ok(value)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn remove(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(id))
    }
}
