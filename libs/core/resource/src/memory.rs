use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::StoredRecord;
use crate::store::RecordStore;

/// In-memory [`RecordStore`] for development and tests
///
/// Ids are assigned sequentially from 1 and never reused. The unique key is
/// enforced on insert and update like a database unique index would.
#[derive(Debug, Clone)]
pub struct InMemoryStore<R> {
    state: Arc<RwLock<State<R>>>,
}

#[derive(Debug)]
struct State<R> {
    records: BTreeMap<i32, R>,
    next_id: i32,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                records: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StoredRecord> State<R> {
    fn ensure_unique(&self, record: &R, ignore_id: Option<i32>) -> Result<(), StoreError> {
        let taken = self
            .records
            .values()
            .any(|r| Some(r.id()) != ignore_id && r.unique_key() == record.unique_key());

        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "duplicate key value '{}'",
                record.unique_key()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for InMemoryStore<R> {
    async fn find_all(&self) -> Result<Vec<R>, StoreError> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<R>, StoreError> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_by_unique(&self, value: &str) -> Result<Option<R>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .find(|r| r.unique_key() == value)
            .cloned())
    }

    async fn insert(&self, record: R) -> Result<R, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_unique(&record, None)?;

        let id = state.next_id;
        state.next_id += 1;

        let stored = record.with_id(id);
        state.records.insert(id, stored.clone());

        tracing::debug!(id, "Inserted record");
        Ok(stored)
    }

    async fn update(&self, record: R) -> Result<R, StoreError> {
        let mut state = self.state.write().await;
        let id = record.id();

        if !state.records.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        state.ensure_unique(&record, Some(id))?;

        state.records.insert(id, record.clone());

        tracing::debug!(id, "Updated record");
        Ok(record)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.records.remove(&id).is_some();

        if removed {
            tracing::debug!(id, "Deleted record");
        }
        Ok(u64::from(removed))
    }
}
