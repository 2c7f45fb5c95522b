//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered; [`Settings`](super::Settings) resolves the defaults.

use serde::{Deserialize, Serialize};

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Default per-call storage deadline in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 3000;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default idle timeout for pooled connections, in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5;

/// Default maximum lifetime of a pooled connection, in seconds.
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 300;

/// Default wait for a free pooled connection, in seconds.
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 3;

/// Default number of rooms per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use bookings::config::{Config, PoolSettings};
///
/// let config = Config {
///     reservation_code_length: Some(12),
///     pool: Some(PoolSettings {
///         max_connections: Some(4),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.reservation_code_length, Some(12));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite connection settings.
    pub database: Option<DatabaseSettings>,

    /// Connection pool limits.
    pub pool: Option<PoolSettings>,

    /// Deadline for each storage call, in milliseconds.
    pub request_timeout_ms: Option<u64>,

    /// Length of generated reservation codes.
    pub reservation_code_length: Option<usize>,

    /// Default `limit` for room and reservation listings.
    pub page_size: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// How long a writer waits for a competing lock, in milliseconds.
    pub busy_timeout_ms: Option<u64>,
}

/// Connection pool limits.
///
/// # Examples
///
/// ```
/// use bookings::config::PoolSettings;
///
/// let pool: PoolSettings = serde_yaml::from_str("max_connections: 4").unwrap();
/// assert_eq!(pool.max_connections, Some(4));
/// assert_eq!(pool.idle_timeout_secs, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum open connections.
    pub max_connections: Option<u32>,
    /// Close connections idle for longer than this, in seconds.
    pub idle_timeout_secs: Option<u64>,
    /// Recycle connections older than this, in seconds.
    pub max_lifetime_secs: Option<u64>,
    /// Wait at most this long for a free connection, in seconds.
    pub connection_timeout_secs: Option<u64>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use bookings::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// Human-readable table format.
    #[default]
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}
