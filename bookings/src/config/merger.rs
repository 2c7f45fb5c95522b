//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, DatabaseSettings, PoolSettings};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use bookings::config::{Config, ConfigMerger};
///
/// let low = Config { page_size: Some(10), ..Default::default() };
/// let high = Config { page_size: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.page_size, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources into a final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Scalar fields are replaced when set in `source`; the nested database
    /// and pool sections merge field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.request_timeout_ms.is_some() {
            target.request_timeout_ms = source.request_timeout_ms;
        }

        if source.reservation_code_length.is_some() {
            target.reservation_code_length = source.reservation_code_length;
        }

        if source.page_size.is_some() {
            target.page_size = source.page_size;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_db) = source.database {
            target.database = Some(match &target.database {
                Some(target_db) => Self::merge_database(target_db, source_db),
                None => source_db.clone(),
            });
        }

        if let Some(ref source_pool) = source.pool {
            target.pool = Some(match &target.pool {
                Some(target_pool) => Self::merge_pool(target_pool, source_pool),
                None => source_pool.clone(),
            });
        }
    }

    fn merge_database(target: &DatabaseSettings, source: &DatabaseSettings) -> DatabaseSettings {
        DatabaseSettings {
            busy_timeout_ms: source.busy_timeout_ms.or(target.busy_timeout_ms),
        }
    }

    fn merge_pool(target: &PoolSettings, source: &PoolSettings) -> PoolSettings {
        PoolSettings {
            max_connections: source.max_connections.or(target.max_connections),
            idle_timeout_secs: source.idle_timeout_secs.or(target.idle_timeout_secs),
            max_lifetime_secs: source.max_lifetime_secs.or(target.max_lifetime_secs),
            connection_timeout_secs: source
                .connection_timeout_secs
                .or(target.connection_timeout_secs),
        }
    }
}
