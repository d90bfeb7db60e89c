use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use crate::common::DatabaseError;

/// Ping the database with `SELECT 1`; used by the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    db.execute_unprepared("SELECT 1")
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}
