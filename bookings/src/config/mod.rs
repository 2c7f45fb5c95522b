//! Configuration system for bookings.
//!
//! This module provides layered configuration with support for:
//! - A YAML configuration file in the data directory
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every value
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`BOOKINGS_*`)
//! 3. User config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! The merged [`Config`] is turned into [`Settings`], the explicit value the
//! rest of the crate is constructed from.
//!
//! # Examples
//!
//! ```
//! use bookings::config::{Config, ConfigBuilder, Settings};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config { reservation_code_length: Some(12), ..Default::default() })
//!     .build()
//!     .unwrap();
//!
//! let settings = Settings::from_config(&config).unwrap();
//! assert_eq!(settings.code_length, 12);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod settings;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, DatabaseSettings, OutputFormat, PoolSettings};
pub use settings::Settings;
pub use validator::ConfigValidator;
