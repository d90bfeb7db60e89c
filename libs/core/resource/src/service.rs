use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ResourceError, ResourceResult, StoreError};
use crate::model::{Resource, StoredRecord};
use crate::store::RecordStore;

/// CRUD orchestration for one resource kind
///
/// Uniqueness is checked before every write that could change the unique
/// key, and the store's own constraint is the backstop for concurrent writers.
pub struct ResourceService<M, S> {
    store: Arc<S>,
    _model: PhantomData<fn() -> M>,
}

impl<M, S> Clone for ResourceService<M, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _model: PhantomData,
        }
    }
}

impl<M, S> ResourceService<M, S>
where
    M: Resource,
    S: RecordStore<M::Record>,
{
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            _model: PhantomData,
        }
    }

    #[instrument(skip(self, input), fields(kind = M::KIND))]
    pub async fn create(&self, input: M::Create) -> ResourceResult<M::View> {
        let key = M::unique_key_of(&input);
        if self.store.find_by_unique(&key).await?.is_some() {
            return Err(ResourceError::conflict(M::KIND, M::UNIQUE_FIELD, &key));
        }

        let model = M::from_creation_input(input)?;
        let stored = self
            .store
            .insert(model.to_stored_record())
            .await
            .map_err(|err| Self::write_error(err, model.id(), model.unique_key()))?;
        let created = M::from_stored_record(stored);

        tracing::info!(id = created.id(), "Created {}", M::KIND);
        Ok(created.to_public())
    }

    #[instrument(skip(self), fields(kind = M::KIND))]
    pub async fn find_all(&self) -> ResourceResult<Vec<M::View>> {
        let records = self.store.find_all().await?;
        Ok(records
            .into_iter()
            .map(|record| M::from_stored_record(record).to_public())
            .collect())
    }

    #[instrument(skip(self), fields(kind = M::KIND))]
    pub async fn find_one(&self, id: i32) -> ResourceResult<M::View> {
        Ok(self.load(id).await?.to_public())
    }

    /// Replace the full representation of `id`
    #[instrument(skip(self, input), fields(kind = M::KIND))]
    pub async fn update(&self, id: i32, input: M::Update) -> ResourceResult<M::View> {
        let current = self.load(id).await?;
        let previous_key = current.unique_key().to_owned();
        let updated = current.apply_full_update(input)?;
        self.persist(updated, &previous_key).await
    }

    /// Replace only the fields present in `input`
    #[instrument(skip(self, input), fields(kind = M::KIND))]
    pub async fn partial_update(&self, id: i32, input: M::Patch) -> ResourceResult<M::View> {
        let current = self.load(id).await?;
        let previous_key = current.unique_key().to_owned();
        let updated = current.apply_partial_update(input)?;
        self.persist(updated, &previous_key).await
    }

    #[instrument(skip(self), fields(kind = M::KIND))]
    pub async fn delete(&self, id: i32) -> ResourceResult<()> {
        let affected = self.store.delete_by_id(id).await?;
        if affected == 0 {
            return Err(ResourceError::not_found(M::KIND, id));
        }

        tracing::info!(id, "Deleted {}", M::KIND);
        Ok(())
    }

    /// A write can still lose a race against another writer: the record may
    /// vanish after `load`, or its unique key may be taken after the check.
    fn write_error(err: StoreError, id: i32, key: &str) -> ResourceError {
        match err {
            StoreError::NotFound => ResourceError::not_found(M::KIND, id),
            StoreError::UniqueViolation(detail) => {
                tracing::debug!(%detail, "Store rejected duplicate key");
                ResourceError::conflict(M::KIND, M::UNIQUE_FIELD, key)
            }
            other => other.into(),
        }
    }

    async fn load(&self, id: i32) -> ResourceResult<M> {
        self.store
            .find_by_id(id)
            .await?
            .map(M::from_stored_record)
            .ok_or_else(|| ResourceError::not_found(M::KIND, id))
    }

    async fn persist(&self, model: M, previous_key: &str) -> ResourceResult<M::View> {
        let key = model.unique_key();
        if key != previous_key {
            if let Some(holder) = self.store.find_by_unique(key).await? {
                if holder.id() != model.id() {
                    return Err(ResourceError::conflict(M::KIND, M::UNIQUE_FIELD, key));
                }
            }
        }

        let stored = self
            .store
            .update(model.to_stored_record())
            .await
            .map_err(|err| Self::write_error(err, model.id(), model.unique_key()))?;
        let updated = M::from_stored_record(stored);

        tracing::info!(id = updated.id(), "Updated {}", M::KIND);
        Ok(updated.to_public())
    }
}
