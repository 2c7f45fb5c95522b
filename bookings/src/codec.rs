//! Conversion between typed records and untyped field maps.
//!
//! Web forms, session payloads and CLI arguments arrive as flat
//! `name -> value` string maps. Every entity and query parameter type in the
//! crate implements [`Marshal`] and [`Unmarshal`] by hand on top of
//! [`FieldReader`] and [`FieldWriter`], so each type spells out exactly which
//! keys it reads and writes.
//!
//! Formatting rules:
//!
//! - integers are base-10 decimal strings
//! - dates are `YYYY-MM-DD`
//! - timestamps are RFC 3339 in UTC
//! - optional values are omitted from marshalled maps when absent
//! - optional text is never blank: `Some("")` reads and writes as absent
//!
//! Decoding is tolerant of missing keys (the target keeps its current value)
//! but fails with [`Error::Encoding`] when a present value cannot be parsed.
//!
//! # Examples
//!
//! ```
//! use bookings::codec::{decode, FieldMap, Marshal};
//! use bookings::CheckRoomAvailabilityParams;
//!
//! let mut fields = FieldMap::new();
//! fields.insert("room_id".into(), "4".into());
//! fields.insert("start_date".into(), "2024-05-08".into());
//! fields.insert("end_date".into(), "2024-05-10".into());
//!
//! let params: CheckRoomAvailabilityParams = decode(&fields).unwrap();
//! assert_eq!(params.room_id, 4);
//! assert_eq!(params.marshal(), fields);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// Ordered map of field names to their string representation.
pub type FieldMap = BTreeMap<String, String>;

/// Date format used for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize a typed record into a field map.
pub trait Marshal {
    /// Produce the field map for this record.
    fn marshal(&self) -> FieldMap;
}

/// Populate a typed record from a field map.
pub trait Unmarshal {
    /// Overwrite the fields of `self` whose keys are present in `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a present value cannot be parsed into
    /// the target field's type. Fields decoded before the failure keep their
    /// new values.
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()>;
}

/// Decode a fresh record from `fields`, starting from its default value.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if any present value fails to parse.
pub fn decode<T: Default + Unmarshal>(fields: &FieldMap) -> Result<T> {
    let mut record = T::default();
    record.unmarshal(fields)?;
    Ok(record)
}

/// Format a date the way the codec writes it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a timestamp the way the codec writes it.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a `YYYY-MM-DD` date, naming `field` in the error.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `value` is not a valid calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| Error::encoding(field, value, e))
}

/// Parse an RFC 3339 timestamp, naming `field` in the error.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `value` is not RFC 3339.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::encoding(field, value, e))
}

/// Collapse blank optional text to `None`.
///
/// Every path that produces optional text (decoding, storage binds and row
/// reads) goes through this, so a record never holds `Some("")`.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Typed read access to a field map.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    /// Wrap a field map for reading.
    #[must_use]
    pub fn new(fields: &'a FieldMap) -> Self {
        Self { fields }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Read a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the value is not a base-10 integer.
    pub fn int(&self, key: &str, target: &mut i64) -> Result<()> {
        if let Some(value) = self.get(key) {
            *target = value
                .trim()
                .parse()
                .map_err(|e| Error::encoding(key, value, e))?;
        }
        Ok(())
    }

    /// Read an optional integer; an empty value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a non-empty value is not an integer.
    pub fn optional_int(&self, key: &str, target: &mut Option<i64>) -> Result<()> {
        if let Some(value) = self.get(key) {
            let value = value.trim();
            *target = if value.is_empty() {
                None
            } else {
                Some(value.parse().map_err(|e| Error::encoding(key, value, e))?)
            };
        }
        Ok(())
    }

    /// Read a non-negative count such as a page limit or offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the value is not an integer, is
    /// negative, or does not fit in `u32`.
    pub fn count(&self, key: &str, target: &mut u32) -> Result<()> {
        if let Some(value) = self.get(key) {
            let parsed: i64 = value
                .trim()
                .parse()
                .map_err(|e| Error::encoding(key, value, e))?;
            if parsed < 0 {
                return Err(Error::encoding(key, value, "must be non-negative"));
            }
            *target = u32::try_from(parsed).map_err(|e| Error::encoding(key, value, e))?;
        }
        Ok(())
    }

    /// Read a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the value is not a valid date.
    pub fn date(&self, key: &str, target: &mut NaiveDate) -> Result<()> {
        if let Some(value) = self.get(key) {
            *target = parse_date(key, value)?;
        }
        Ok(())
    }

    /// Read an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the value is not RFC 3339.
    pub fn timestamp(&self, key: &str, target: &mut DateTime<Utc>) -> Result<()> {
        if let Some(value) = self.get(key) {
            *target = parse_timestamp(key, value)?;
        }
        Ok(())
    }

    /// Read free text verbatim.
    pub fn text(&self, key: &str, target: &mut String) {
        if let Some(value) = self.get(key) {
            value.clone_into(target);
        }
    }

    /// Read nullable text; an empty value becomes `None`.
    pub fn optional_text(&self, key: &str, target: &mut Option<String>) {
        if let Some(value) = self.get(key) {
            *target = non_blank(Some(value)).map(str::to_owned);
        }
    }
}

/// Builder for a field map.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: FieldMap,
}

impl FieldWriter {
    /// Start an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an integer.
    #[must_use]
    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_owned(), value.to_string());
        self
    }

    /// Write an integer only when present.
    #[must_use]
    pub fn optional_int(mut self, key: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.fields.insert(key.to_owned(), value.to_string());
        }
        self
    }

    /// Write a non-negative count.
    #[must_use]
    pub fn count(mut self, key: &str, value: u32) -> Self {
        self.fields.insert(key.to_owned(), value.to_string());
        self
    }

    /// Write a date.
    #[must_use]
    pub fn date(mut self, key: &str, value: NaiveDate) -> Self {
        self.fields.insert(key.to_owned(), format_date(value));
        self
    }

    /// Write a timestamp.
    #[must_use]
    pub fn timestamp(mut self, key: &str, value: &DateTime<Utc>) -> Self {
        self.fields.insert(key.to_owned(), format_timestamp(value));
        self
    }

    /// Write free text.
    #[must_use]
    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Write text only when present and non-blank.
    #[must_use]
    pub fn optional_text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.fields.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Finish and return the map.
    #[must_use]
    pub fn finish(self) -> FieldMap {
        self.fields
    }
}
