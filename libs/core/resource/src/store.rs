use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::StoredRecord;

/// Key-addressed persistence for one record type
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    /// Every record, ordered by id
    async fn find_all(&self) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<R>, StoreError>;

    /// Lookup by the uniqueness-constrained column
    async fn find_by_unique(&self, value: &str) -> Result<Option<R>, StoreError>;

    /// Persist a new record and return it with its assigned id
    async fn insert(&self, record: R) -> Result<R, StoreError>;

    /// Overwrite an existing record
    async fn update(&self, record: R) -> Result<R, StoreError>;

    /// Number of records removed (0 or 1)
    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError>;
}
