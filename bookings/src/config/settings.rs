//! Resolved runtime settings.
//!
//! [`Settings`] is the fully defaulted form of a [`Config`]. It is built once
//! and handed to the components that need it.

use std::path::Path;
use std::time::Duration;

use crate::code::{CodeGenerator, DEFAULT_CODE_LENGTH};
use crate::config::schema::{
    Config, OutputFormat, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_CONNECTION_TIMEOUT_SECS,
    DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_LIFETIME_SECS,
    DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_MS,
};
use crate::config::validator::ConfigValidator;
use crate::context::RequestContext;
use crate::database::{DatabaseConfig, PoolConfig};
use crate::error::Result;

/// Configuration with every default applied.
///
/// # Examples
///
/// ```
/// use bookings::config::{Config, Settings};
/// use std::time::Duration;
///
/// let settings = Settings::from_config(&Config::default()).unwrap();
/// assert_eq!(settings.request_timeout, Duration::from_secs(3));
/// assert_eq!(settings.page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// SQLite busy timeout.
    pub busy_timeout: Duration,
    /// Connection pool limits.
    pub pool: PoolConfig,
    /// Deadline applied to each storage call.
    pub request_timeout: Duration,
    /// Length of generated reservation codes.
    pub code_length: usize,
    /// Default listing page size.
    pub page_size: u32,
    /// Refuse to create a missing data directory.
    pub disable_autoinit: bool,
    /// Output format for list commands.
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            pool: PoolConfig::default(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            code_length: DEFAULT_CODE_LENGTH,
            page_size: DEFAULT_PAGE_SIZE,
            disable_autoinit: false,
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Validates `config` and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if a value is out of range.
    pub fn from_config(config: &Config) -> Result<Self> {
        ConfigValidator::validate(config)?;

        let pool = config.pool.clone().unwrap_or_default();
        let busy_timeout_ms = config
            .database
            .as_ref()
            .and_then(|db| db.busy_timeout_ms)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

        Ok(Self {
            busy_timeout: Duration::from_millis(busy_timeout_ms),
            pool: PoolConfig::default()
                .with_max_size(pool.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .with_idle_timeout(Duration::from_secs(
                    pool.idle_timeout_secs.unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS),
                ))
                .with_max_lifetime(Duration::from_secs(
                    pool.max_lifetime_secs.unwrap_or(DEFAULT_MAX_LIFETIME_SECS),
                ))
                .with_connection_timeout(Duration::from_secs(
                    pool.connection_timeout_secs
                        .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
                )),
            request_timeout: Duration::from_millis(
                config.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            ),
            code_length: config.reservation_code_length.unwrap_or(DEFAULT_CODE_LENGTH),
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            disable_autoinit: config.disable_autoinit.unwrap_or(false),
            output_format: config.output_format.unwrap_or_default(),
        })
    }

    /// Store configuration for the database file at `path`.
    #[must_use]
    pub fn database_config(&self, path: impl AsRef<Path>) -> DatabaseConfig {
        let config = DatabaseConfig::new(path)
            .with_busy_timeout(self.busy_timeout)
            .with_pool(self.pool.clone());
        if self.disable_autoinit {
            config.without_auto_create()
        } else {
            config
        }
    }

    /// A fresh context carrying the configured deadline.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }

    /// A code generator with the configured length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the length is out of range.
    pub fn code_generator(&self) -> Result<CodeGenerator> {
        CodeGenerator::new(self.code_length)
    }
}
