use std::collections::BTreeMap;
use std::sync::RwLock;

use sattva_core::{Entity, ExpectedVersion};

use super::r#trait::{RecordStore, StoreError, Versioned};

/// In-memory record store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryRecordStore<R: Entity> {
    records: RwLock<BTreeMap<R::Id, Versioned<R>>>,
}

impl<R: Entity> Default for InMemoryRecordStore<R>
where
    R::Id: Ord,
{
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<R: Entity> InMemoryRecordStore<R>
where
    R::Id: Ord,
{
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl<R> RecordStore<R> for InMemoryRecordStore<R>
where
    R: Entity + Clone + Send + Sync,
    R::Id: Ord + Send + Sync,
{
    fn insert(&self, record: R) -> Result<Versioned<R>, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let id = record.id().clone();
        if records.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        let stored = Versioned {
            record,
            revision: 1,
        };
        records.insert(id, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: &R::Id) -> Result<Option<Versioned<R>>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Versioned<R>>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    fn compare_and_swap(
        &self,
        id: &R::Id,
        expected: ExpectedVersion,
        next: R,
    ) -> Result<Versioned<R>, StoreError> {
        if next.id() != id {
            return Err(StoreError::Concurrency(format!(
                "record id changed from {id} to {}",
                next.id()
            )));
        }

        let mut records = self.records.write().map_err(|_| poisoned())?;
        let current = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !expected.matches(current.revision) {
            return Err(StoreError::Concurrency(format!(
                "expected {expected:?}, found revision {}",
                current.revision
            )));
        }

        current.record = next;
        current.revision += 1;
        Ok(current.clone())
    }
}
