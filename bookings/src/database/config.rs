//! Database configuration and connection parameters.
//!
//! This module provides configuration types for the store, including path
//! resolution, lock handling and connection pool limits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "bookings.db";

/// Limits of the shared connection pool.
///
/// # Examples
///
/// ```
/// use bookings::database::PoolConfig;
/// use std::time::Duration;
///
/// let pool = PoolConfig::default()
///     .with_max_size(4)
///     .with_idle_timeout(Duration::from_secs(1));
/// assert_eq!(pool.max_size, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of open connections.
    pub max_size: u32,
    /// How long an unused connection stays open.
    pub idle_timeout: Duration,
    /// Maximum age of a connection before it is replaced.
    pub max_lifetime: Duration,
    /// Longest wait for a free connection.
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    /// Defaults: 10 connections, 5s idle timeout, 5min lifetime, 3s checkout.
    fn default() -> Self {
        Self {
            max_size: 10,
            idle_timeout: Duration::from_secs(5),
            max_lifetime: Duration::from_secs(300),
            connection_timeout: Duration::from_secs(3),
        }
    }
}

impl PoolConfig {
    /// Set the maximum number of connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the idle timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the maximum connection lifetime.
    #[must_use]
    pub fn with_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Set the checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Reject limits the pool cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::validation("pool.max_connections", "must be at least 1"));
        }
        for (field, value) in [
            ("pool.idle_timeout_secs", self.idle_timeout),
            ("pool.max_lifetime_secs", self.max_lifetime),
            ("pool.connection_timeout_secs", self.connection_timeout),
        ] {
            if value.is_zero() {
                return Err(Error::validation(field, "must be greater than zero"));
            }
        }
        Ok(())
    }
}

/// Configuration for opening the store.
///
/// # Examples
///
/// ```
/// use bookings::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/bookings.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
    /// Connection pool limits.
    pub pool: PoolConfig,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    /// - `pool`: [`PoolConfig::default`]
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
            pool: PoolConfig::default(),
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the connection pool limits.
    #[must_use]
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Disables creation of a missing database file.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.bookings`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".bookings"))
        .ok_or_else(|| Error::validation("home_directory", "cannot determine home directory"))
}

/// Resolves the database path from `BOOKINGS_DATA_DIR` or the default
/// data directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `BOOKINGS_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("BOOKINGS_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join(DATABASE_FILE))
    } else {
        Ok(default_data_dir()?.join(DATABASE_FILE))
    }
}
