use resource::StoreError;
use sea_orm::{DbErr, SqlErr};

/// Errors raised by the PostgreSQL layer
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A write collided with a unique index
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The targeted row does not exist (anymore)
    #[error("Record not found")]
    RecordNotFound,

    /// Any other SeaORM error
    #[error("PostgreSQL error: {0}")]
    Postgres(DbErr),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

impl From<DbErr> for DatabaseError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) {
            return DatabaseError::RecordNotFound;
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => DatabaseError::UniqueViolation(detail),
            _ => DatabaseError::Postgres(err),
        }
    }
}

/// Record stores surface unique violations and vanished rows as such so the
/// service layer can report conflicts and absences; everything else is a
/// backend failure.
impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(detail) => StoreError::UniqueViolation(detail),
            DatabaseError::RecordNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
