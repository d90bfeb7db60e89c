//! PostgreSQL plumbing shared by the catalog services
//!
//! - [`postgres`]: pool configuration, connection with retry, migrations and
//!   health checks
//! - [`repository`]: [`BaseRepository`], a thin SeaORM wrapper for
//!   single-record reads and writes keyed by an integer primary key
//! - [`common`]: error type and start-up backoff
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use core_config::FromEnv;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, None).await?;
//! run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
