//! Environment variable handling for configuration overrides.
//!
//! `BOOKINGS_*` variables override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use bookings::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric timeout or an unrecognised boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(ms) = Self::number("BOOKINGS_REQUEST_TIMEOUT_MS")? {
            config.request_timeout_ms = Some(ms);
        }

        if let Some(length) = Self::number("BOOKINGS_CODE_LENGTH")? {
            config.reservation_code_length = Some(length);
        }

        if let Some(size) = Self::number("BOOKINGS_PAGE_SIZE")? {
            config.page_size = Some(size);
        }

        if let Some(max) = Self::number("BOOKINGS_POOL_MAX_CONNECTIONS")? {
            config
                .pool
                .get_or_insert_with(Default::default)
                .max_connections = Some(max);
        }

        if let Some(ms) = Self::number("BOOKINGS_BUSY_TIMEOUT_MS")? {
            config
                .database
                .get_or_insert_with(Default::default)
                .busy_timeout_ms = Some(ms);
        }

        if let Ok(val) = env::var("BOOKINGS_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("BOOKINGS_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("BOOKINGS_OUTPUT_FORMAT") {
            config.output_format = Some(Self::parse_format("BOOKINGS_OUTPUT_FORMAT", &val)?);
        }

        Ok(())
    }

    fn number<T: FromStr>(name: &str) -> Result<Option<T>> {
        let Ok(raw) = env::var(name) else {
            return Ok(None);
        };
        raw.trim().parse().map(Some).map_err(|_| Error::Validation {
            field: name.into(),
            message: format!("Must be a non-negative integer, got '{raw}'"),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_format(field: &str, s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid output format: '{s}' (expected json/csv/table)"),
            }),
        }
    }
}
