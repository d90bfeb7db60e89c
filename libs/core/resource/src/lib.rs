//! Generic CRUD core shared by the catalog domains
//!
//! A domain plugs in by implementing [`Resource`] for its validated model and
//! [`StoredRecord`] for its persisted row. [`ResourceService`] then provides
//! create, read, full update, partial update and delete on top of any
//! [`RecordStore`].
//!
//! ```text
//! payload ──► Resource::from_creation_input (validate)
//!                      │
//!             ResourceService (uniqueness / existence)
//!                      │
//!             RecordStore write ──► Resource::to_public ──► view
//! ```

pub mod error;
pub mod memory;
pub mod model;
pub mod service;
pub mod store;

pub use error::{ResourceError, ResourceResult, StoreError};
pub use memory::InMemoryStore;
pub use model::{Resource, StoredRecord};
pub use service::ResourceService;
pub use store::RecordStore;
