//! Half-open date ranges used for availability arithmetic.
//!
//! A stay from `start` to `end` occupies the nights `start, start+1, ...,
//! end-1`. The guest leaves on `end`, so the next guest may arrive the same
//! day: `[a, b)` and `[b, c)` never overlap.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::format_date;
use crate::error::{Error, Result};

/// A validated half-open date interval `[start, end)`.
///
/// Deserialization goes through [`DateRange::new`], so a stored range is
/// never empty or backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a range, rejecting empty and backwards intervals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `end <= start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookings::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let may1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let may8 = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
    ///
    /// assert!(DateRange::new(may1, may8).is_ok());
    /// assert!(DateRange::new(may8, may1).is_err());
    /// assert!(DateRange::new(may1, may1).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First night of the range.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Departure date; not part of the range.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Check whether `date` is one of the nights in the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Check whether two ranges share at least one night.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookings::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
    /// let blocked = DateRange::new(d(1), d(8)).unwrap();
    ///
    /// assert!(!blocked.overlaps(&DateRange::new(d(8), d(10)).unwrap()));
    /// assert!(blocked.overlaps(&DateRange::new(d(5), d(10)).unwrap()));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        intervals_overlap(self.start, self.end, other.start, other.end)
    }
}

/// Overlap predicate for `[a, b)` and `[c, d)`.
#[must_use]
pub fn intervals_overlap(a: NaiveDate, b: NaiveDate, c: NaiveDate, d: NaiveDate) -> bool {
    a < d && c < b
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}
