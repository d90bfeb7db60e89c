use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{Backoff, with_backoff};

/// Open a pool using `config`
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool, backing off while the server is unreachable.
///
/// `None` uses [`Backoff::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    backoff: Option<Backoff>,
) -> Result<DatabaseConnection, DbErr> {
    with_backoff(backoff.unwrap_or_default(), || connect_from_config(config.clone())).await
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations applied");
    Ok(())
}

/// Close the pool during shutdown, logging instead of failing
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection pool closed"),
        Err(e) => tracing::error!("Error closing PostgreSQL connection pool: {}", e),
    }
}
