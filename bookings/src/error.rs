//! Error types for the bookings library.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! grouped into the categories exposed by [`ErrorKind`] so callers can decide
//! whether to render, retry, or abort without matching on every variant.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for operations that may fail with a bookings error.
///
/// # Examples
///
/// ```
/// use bookings::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bookings library.
#[derive(Debug, Error)]
pub enum Error {
    /// A field map value could not be converted into its target type.
    #[error("cannot decode field '{field}' from {value:?}: {reason}")]
    Encoding {
        /// The field name as it appears in the field map.
        field: String,
        /// The raw value that failed to parse.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A date range whose end does not come after its start.
    #[error("invalid date range {start}..{end}: end date must be after start date")]
    InvalidDateRange {
        /// The requested first night.
        start: NaiveDate,
        /// The requested departure date.
        end: NaiveDate,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The room already carries a restriction overlapping the requested dates.
    #[error("room {room_id} is not available from {start} to {end}")]
    AvailabilityConflict {
        /// The room that was requested.
        room_id: i64,
        /// First night of the rejected range.
        start: NaiveDate,
        /// Departure date of the rejected range.
        end: NaiveDate,
    },

    /// A reservation code collided with an existing reservation.
    #[error("reservation code {code} is already in use")]
    DuplicateCode {
        /// The colliding code.
        code: String,
    },

    /// The store rejected a row because it violates a schema constraint.
    #[error("constraint violation: {details}")]
    ConstraintViolation {
        /// The message reported by the store.
        details: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Credentials did not match a known user.
    #[error("could not authenticate user")]
    AuthenticationFailed,

    /// Password hashing failed.
    #[error("password hashing failed: {details}")]
    PasswordHash {
        /// The message reported by the hasher.
        details: String,
    },

    /// The code generator could not fill every slot.
    #[error("reservation code generation failed: {reason}")]
    CodeGeneration {
        /// Why generation failed.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No pooled connection became available in time.
    #[error("connection pool error: {details}")]
    Pool {
        /// The message reported by the pool.
        details: String,
    },

    /// The request deadline passed before the store call finished.
    #[error("request timed out after {millis}ms")]
    Timeout {
        /// The configured deadline in milliseconds.
        millis: u64,
    },

    /// The request was cancelled by its caller.
    #[error("request cancelled")]
    Cancelled,

    /// A database lock timeout occurred.
    #[error("database lock timeout after {millis}ms")]
    LockTimeout {
        /// The busy timeout that elapsed.
        millis: u64,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON payload could not be read or written.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

/// Broad failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input could not be decoded into typed parameters.
    Encoding,
    /// Input decoded but failed a business rule.
    Validation,
    /// The requested dates or code are already taken.
    Conflict,
    /// A referenced row does not exist.
    NotFound,
    /// The store rejected the transaction; nothing was committed.
    Transaction,
    /// Deadline, cancellation, lock or pool exhaustion. Safe to retry.
    Connectivity,
    /// Configuration or data directory problems.
    Configuration,
    /// Filesystem or serialization failures.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Encoding => "encoding",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not found",
            Self::Transaction => "transaction",
            Self::Connectivity => "connectivity",
            Self::Configuration => "configuration",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool {
            details: err.to_string(),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            details: err.to_string(),
        }
    }
}

impl Error {
    /// Build an encoding error for `field`.
    pub(crate) fn encoding(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Encoding {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a validation error for `field`.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Return the failure category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookings::{Error, ErrorKind};
    ///
    /// let err = Error::Timeout { millis: 3000 };
    /// assert_eq!(err.kind(), ErrorKind::Connectivity);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } | Self::InvalidDateRange { .. } => ErrorKind::Encoding,
            Self::Validation { .. } | Self::AuthenticationFailed | Self::CodeGeneration { .. } => {
                ErrorKind::Validation
            }
            Self::AvailabilityConflict { .. } | Self::DuplicateCode { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConstraintViolation { .. }
            | Self::Database(_)
            | Self::PasswordHash { .. }
            | Self::DatabaseCorruption { .. } => ErrorKind::Transaction,
            Self::Pool { .. } | Self::Timeout { .. } | Self::Cancelled | Self::LockTimeout { .. } => {
                ErrorKind::Connectivity
            }
            Self::Configuration(_)
            | Self::DataDirectoryNotFound { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Configuration,
            Self::Io(_) | Self::Serialization(_) => ErrorKind::Io,
        }
    }

    /// Check if the failed call may succeed when retried unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Connectivity
    }

    /// Check if error reports that the requested dates are taken.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AvailabilityConflict { .. })
    }

    /// Check if error indicates a missing row.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_encoding_error() {
        let err = Error::encoding("room_id", "abc", "invalid digit found in string");
        let display = format!("{err}");
        assert!(display.contains("room_id"));
        assert!(display.contains("\"abc\""));
        assert!(display.contains("invalid digit"));
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_date_range_error() {
        let err = Error::InvalidDateRange {
            start: date("2024-05-10"),
            end: date("2024-05-08"),
        };
        let display = format!("{err}");
        assert!(display.contains("2024-05-10..2024-05-08"));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_availability_conflict_error() {
        let err = Error::AvailabilityConflict {
            room_id: 3,
            start: date("2024-06-01"),
            end: date("2024-06-05"),
        };
        let display = format!("{err}");
        assert!(display.contains("room 3"));
        assert!(display.contains("2024-06-01"));
        assert!(err.is_conflict());
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_validation_error() {
        let err = Error::validation("limit", "must be non-negative");
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("limit"));
        assert!(display.contains("must be non-negative"));
    }

    #[test]
    fn test_connectivity_errors_are_retryable() {
        assert!(Error::Timeout { millis: 3000 }.is_retryable());
        assert!(Error::Cancelled.is_retryable());
        assert!(Error::LockTimeout { millis: 5000 }.is_retryable());
        assert!(Error::Pool {
            details: "timed out waiting for connection".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_transaction_errors_are_not_retryable() {
        let err = Error::ConstraintViolation {
            details: "NOT NULL constraint failed: reservations.first_name".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Transaction);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_authentication_error_is_generic() {
        assert_eq!(
            format!("{}", Error::AuthenticationFailed),
            "could not authenticate user"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "reservation with code 1A2B3C".to_string(),
        };
        assert!(err.is_not_found());
        assert!(format!("{err}").contains("1A2B3C"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Connectivity.to_string(), "connectivity");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
    }
}
