//! Shared application state
//!
//! Built once at start-up. Domain stores get their own clone of the
//! connection pool, and the state itself is kept for the readiness check and
//! for closing the pool on shutdown.

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
