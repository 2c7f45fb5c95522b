//! Logging backend for the bookings library and CLI.
//!
//! The crate logs through the `log` facade. This module provides the stderr
//! backend used by the CLI, with three verbosity levels.

use std::env;
use std::fmt;

use log::{LevelFilter, Metadata, Record};

/// Environment variable consulted when no CLI flag picks a level.
pub const LOG_MODE_VAR: &str = "BOOKINGS_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use bookings::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all log output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookings::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter this level lets through.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr backend for the `log` facade.
///
/// # Examples
///
/// ```
/// use bookings::{Logger, LogLevel};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Picks the log level from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet; verbose wins if both are set)
/// 2. `BOOKINGS_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// An unrecognised environment value falls back to the default.
#[must_use]
pub fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }
    env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or(LogLevel::Normal)
}

/// Installs the stderr logger as the global `log` backend.
///
/// Returns the level in effect. If a backend is already installed it is kept
/// and only the maximum level is updated, so repeated calls are harmless.
///
/// # Examples
///
/// ```
/// use bookings::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let level = resolve_level(verbose, quiet);
    // Already installed: keep the first backend.
    let _ = log::set_boxed_logger(Box::new(Logger::new(level)));
    log::set_max_level(level.filter());
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use serial_test::serial;

    fn metadata(level: log::Level) -> Metadata<'static> {
        Metadata::builder().level(level).build()
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Quiet < LogLevel::Normal);
        assert!(LogLevel::Normal < LogLevel::Verbose);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Quiet), "quiet");
        assert_eq!(format!("{}", LogLevel::Normal), "normal");
        assert_eq!(format!("{}", LogLevel::Verbose), "verbose");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_filters() {
        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.enabled(&metadata(log::Level::Error)));

        let normal = Logger::default();
        assert!(normal.enabled(&metadata(log::Level::Error)));
        assert!(normal.enabled(&metadata(log::Level::Warn)));
        assert!(!normal.enabled(&metadata(log::Level::Info)));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.enabled(&metadata(log::Level::Debug)));
        assert!(!verbose.enabled(&metadata(log::Level::Trace)));
    }

    #[test]
    #[serial]
    fn test_resolve_level_defaults() {
        let saved = env::var(LOG_MODE_VAR).ok();
        env::remove_var(LOG_MODE_VAR);

        assert_eq!(resolve_level(false, false), LogLevel::Normal);
        assert_eq!(resolve_level(true, true), LogLevel::Verbose);
        assert_eq!(resolve_level(false, true), LogLevel::Quiet);

        if let Some(val) = saved {
            env::set_var(LOG_MODE_VAR, val);
        }
    }

    #[test]
    #[serial]
    fn test_resolve_level_from_env() {
        let saved = env::var(LOG_MODE_VAR).ok();

        env::set_var(LOG_MODE_VAR, "verbose");
        assert_eq!(resolve_level(false, false), LogLevel::Verbose);

        env::set_var(LOG_MODE_VAR, "invalid");
        assert_eq!(resolve_level(false, false), LogLevel::Normal);

        env::set_var(LOG_MODE_VAR, "normal");
        assert_eq!(resolve_level(true, false), LogLevel::Verbose);

        match saved {
            Some(val) => env::set_var(LOG_MODE_VAR, val),
            None => env::remove_var(LOG_MODE_VAR),
        }
    }
}
