use thiserror::Error;

/// Failures a resource operation can report to its caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// One message per violated rule, each starting with the offending field
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    pub fn not_found(kind: &str, id: i32) -> Self {
        ResourceError::NotFound(format!("{kind} with id {id} not found"))
    }

    pub fn conflict(kind: &str, field: &str, value: &str) -> Self {
        ResourceError::Conflict(format!("{kind} with {field} '{value}' already exists"))
    }
}

pub type ResourceResult<T> = Result<T, ResourceError>;

/// Failures raised by a [`crate::RecordStore`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write collided with the store's uniqueness constraint
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The record targeted by a write no longer exists
    #[error("Record not found")]
    NotFound,

    #[error("Store failure: {0}")]
    Backend(String),
}

const GENERIC_CONFLICT: &str = "A record with the same unique value already exists";
const GENERIC_NOT_FOUND: &str = "Record not found";

/// Translation without knowledge of the resource kind.
///
/// The store's constraint detail is logged, never passed on. The service
/// replaces these messages with kind-specific ones where it can.
impl From<StoreError> for ResourceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(detail) => {
                tracing::debug!(%detail, "Store rejected duplicate key");
                ResourceError::Conflict(GENERIC_CONFLICT.to_string())
            }
            StoreError::NotFound => ResourceError::NotFound(GENERIC_NOT_FOUND.to_string()),
            StoreError::Backend(msg) => ResourceError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_conflict_and_internal() {
        let conflict = ResourceError::from(StoreError::UniqueViolation(
            "duplicate key value violates unique constraint \"users_email_key\"".into(),
        ));
        assert!(matches!(conflict, ResourceError::Conflict(ref msg) if !msg.contains("users_email_key")));
        assert!(matches!(
            ResourceError::from(StoreError::NotFound),
            ResourceError::NotFound(_)
        ));
        assert_eq!(
            ResourceError::from(StoreError::Backend("pool closed".into())),
            ResourceError::Internal("pool closed".into())
        );
    }

    #[test]
    fn test_constructors_format_messages() {
        assert_eq!(
            ResourceError::not_found("Product", 7).to_string(),
            "Product with id 7 not found"
        );
        assert_eq!(
            ResourceError::conflict("User", "email", "ana@example.com").to_string(),
            "User with email 'ana@example.com' already exists"
        );
    }
}
