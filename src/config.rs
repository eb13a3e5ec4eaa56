//! Runtime configuration read from the environment.

use crate::storage::RegistryPgPool;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::fmt;
use thiserror::Error;

/// Preferred variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "ESTATE_DATABASE_URL";
/// Fallback variable for the connection URL.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Variable holding the maximum pool size.
pub const POOL_MAX_SIZE_VAR: &str = "ESTATE_POOL_MAX_SIZE";
/// Variable holding the default log filter.
pub const LOG_FILTER_VAR: &str = "ESTATE_LOG";

const DEFAULT_POOL_MAX_SIZE: u32 = 8;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No connection URL was supplied.
    #[error("set {DATABASE_URL_VAR} or {FALLBACK_DATABASE_URL_VAR} to a PostgreSQL URL")]
    MissingDatabaseUrl,

    /// A variable held a value that could not be used.
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] PoolError),
}

/// Settings for the registry store and logging.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    database_url: String,
    pool_max_size: u32,
    log_filter: String,
}

impl RegistryConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RegistryConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when neither URL variable
    /// is set, or [`ConfigError::InvalidValue`] when the pool size is not a
    /// positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR)
            .or_else(|| read(FALLBACK_DATABASE_URL_VAR))
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let pool_max_size = match read(POOL_MAX_SIZE_VAR) {
            None => DEFAULT_POOL_MAX_SIZE,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: POOL_MAX_SIZE_VAR,
                    value: raw,
                })?,
        };

        let log_filter =
            read(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            pool_max_size,
            log_filter,
        })
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Returns the log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Builds the shared connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when no initial connection can be made.
    pub fn build_pool(&self) -> Result<RegistryPgPool, ConfigError> {
        Pool::builder()
            .max_size(self.pool_max_size)
            .build(ConnectionManager::<PgConnection>::new(&self.database_url))
            .map_err(ConfigError::Pool)
    }
}

// The URL may embed a password.
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("database_url", &"..")
            .field("pool_max_size", &self.pool_max_size)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}
