use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// Pool lifetimes, all 8 seconds by default
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolTimeouts {
    pub connect: Duration,
    pub acquire: Duration,
    pub idle: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        let eight = Duration::from_secs(8);
        Self {
            connect: eight,
            acquire: eight,
            idle: eight,
            max_lifetime: eight,
        }
    }
}

/// Where the catalog tables live and how the pool in front of them behaves
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub timeouts: PoolTimeouts,
    /// Echo statements through sqlx's logger
    pub sqlx_logging: bool,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 100,
            min_connections: 5,
            timeouts: PoolTimeouts::default(),
            sqlx_logging: true,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let PoolTimeouts {
            connect,
            acquire,
            idle,
            max_lifetime,
        } = self.timeouts;

        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(connect)
            .acquire_timeout(acquire)
            .idle_timeout(idle)
            .max_lifetime(max_lifetime)
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

#[cfg(feature = "config")]
fn env_secs(key: &str) -> Result<Duration, ConfigError> {
    env_parse::<u64>(key, "8").map(Duration::from_secs)
}

/// `DATABASE_URL` is required. Pool sizing comes from `DB_MAX_CONNECTIONS`
/// and `DB_MIN_CONNECTIONS`, lifetimes from the `DB_*_TIMEOUT_SECS` family
/// and `DB_MAX_LIFETIME_SECS`, statement logging from `DB_SQLX_LOGGING`.
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: env_parse("DB_MAX_CONNECTIONS", "100")?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", "5")?,
            timeouts: PoolTimeouts {
                connect: env_secs("DB_CONNECT_TIMEOUT_SECS")?,
                acquire: env_secs("DB_ACQUIRE_TIMEOUT_SECS")?,
                idle: env_secs("DB_IDLE_TIMEOUT_SECS")?,
                max_lifetime: env_secs("DB_MAX_LIFETIME_SECS")?,
            },
            sqlx_logging: env_parse("DB_SQLX_LOGGING", "true")?,
        })
    }
}
