use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::Result;

/// A guest booking.
///
/// The code is generated before the booking is stored and never changes
/// afterwards. Guest details and notes may be corrected later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned identifier.
    pub id: i64,
    /// Human-readable booking reference, unique across reservations.
    pub code: String,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Arrival date; the first night of the stay.
    pub start_date: NaiveDate,
    /// Departure date; not a night of the stay.
    pub end_date: NaiveDate,
    /// The booked room.
    pub room_id: i64,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// The booked stay.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if the dates are not a
    /// forward interval.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for Reservation {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("code", &self.code)
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name)
            .text("email", &self.email)
            .optional_text("phone", self.phone.as_deref())
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .int("room_id", self.room_id)
            .optional_text("notes", self.notes.as_deref())
            .timestamp("created_at", &self.created_at)
            .timestamp("updated_at", &self.updated_at)
            .finish()
    }
}

impl Unmarshal for Reservation {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("code", &mut self.code);
        r.text("first_name", &mut self.first_name);
        r.text("last_name", &mut self.last_name);
        r.text("email", &mut self.email);
        r.optional_text("phone", &mut self.phone);
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        r.int("room_id", &mut self.room_id)?;
        r.optional_text("notes", &mut self.notes);
        r.timestamp("created_at", &mut self.created_at)?;
        r.timestamp("updated_at", &mut self.updated_at)?;
        Ok(())
    }
}
