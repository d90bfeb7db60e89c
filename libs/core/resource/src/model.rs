use serde::Serialize;
use std::fmt::Debug;

use crate::error::ResourceResult;

/// A flat persisted row
///
/// An id of `0` (or less) marks a record that has not been stored yet; stores
/// assign a fresh id on insert.
pub trait StoredRecord: Clone + Debug + Send + Sync + 'static {
    fn id(&self) -> i32;

    /// Copy of the record carrying `id`
    fn with_id(self, id: i32) -> Self;

    /// Value of the uniqueness-constrained column
    fn unique_key(&self) -> &str;
}

/// Validated in-memory model of one resource kind
///
/// Every constructor and update re-checks the model's invariants and fails
/// with [`crate::ResourceError::Validation`] when one is broken. Rehydration
/// from storage trusts the row and does not validate.
pub trait Resource: Sized + Send + Sync + 'static {
    type Record: StoredRecord;
    type Create: Debug + Send + Sync;
    /// Full representation used by PUT
    type Update: Debug + Send + Sync;
    /// Optional fields used by PATCH
    type Patch: Debug + Send + Sync;
    type View: Serialize + Debug + Send;

    /// Human name used in error messages, e.g. `"Product"`
    const KIND: &'static str;
    /// Name of the uniqueness-constrained field, e.g. `"name"`
    const UNIQUE_FIELD: &'static str;

    /// Unique key a creation input would be stored under
    fn unique_key_of(input: &Self::Create) -> String;

    /// New, not yet persisted model (id 0, created now)
    fn from_creation_input(input: Self::Create) -> ResourceResult<Self>;

    fn from_stored_record(record: Self::Record) -> Self;

    fn to_stored_record(&self) -> Self::Record;

    /// Caller-visible projection; never exposes secrets
    fn to_public(&self) -> Self::View;

    fn apply_full_update(self, input: Self::Update) -> ResourceResult<Self>;

    /// Replaces only the fields present in `input`
    fn apply_partial_update(self, input: Self::Patch) -> ResourceResult<Self>;

    fn id(&self) -> i32;

    fn unique_key(&self) -> &str;
}
