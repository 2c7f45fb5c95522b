//! Configuration validation.

use crate::code::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use crate::config::schema::{Config, PoolSettings, MAX_PAGE_SIZE};
use crate::error::{Error, Result};

/// Validates configuration values before they are used.
///
/// # Examples
///
/// ```
/// use bookings::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { reservation_code_length: Some(4), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ms) = config.request_timeout_ms {
            Self::validate_positive("request_timeout_ms", ms)?;
        }

        if let Some(length) = config.reservation_code_length {
            if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
                return Err(Error::Validation {
                    field: "reservation_code_length".into(),
                    message: format!(
                        "Must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH}, got {length}"
                    ),
                });
            }
        }

        if let Some(size) = config.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(Error::Validation {
                    field: "page_size".into(),
                    message: format!("Must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
                });
            }
        }

        if let Some(ref database) = config.database {
            if let Some(ms) = database.busy_timeout_ms {
                Self::validate_positive("database.busy_timeout_ms", ms)?;
            }
        }

        if let Some(ref pool) = config.pool {
            Self::validate_pool(pool)?;
        }

        Ok(())
    }

    fn validate_pool(pool: &PoolSettings) -> Result<()> {
        if pool.max_connections == Some(0) {
            return Err(Error::Validation {
                field: "pool.max_connections".into(),
                message: "Must be greater than 0".into(),
            });
        }
        if let Some(secs) = pool.idle_timeout_secs {
            Self::validate_positive("pool.idle_timeout_secs", secs)?;
        }
        if let Some(secs) = pool.max_lifetime_secs {
            Self::validate_positive("pool.max_lifetime_secs", secs)?;
        }
        if let Some(secs) = pool.connection_timeout_secs {
            Self::validate_positive("pool.connection_timeout_secs", secs)?;
        }
        Ok(())
    }

    fn validate_positive(field: &str, value: u64) -> Result<()> {
        if value == 0 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Must be greater than 0".into(),
            });
        }
        Ok(())
    }
}
