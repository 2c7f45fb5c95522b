use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::Result;

/// A calendar block on a room.
///
/// Blocks govern availability: a room is free for a range exactly when none
/// of its blocks overlap it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRestriction {
    /// Store-assigned identifier.
    pub id: i64,
    /// First blocked night.
    pub start_date: NaiveDate,
    /// Day the block ends; not itself blocked.
    pub end_date: NaiveDate,
    /// The blocked room.
    pub room_id: i64,
    /// The reservation that owns this block, for reservation blocks.
    pub reservation_id: Option<i64>,
    /// Catalog identifier of the block reason.
    pub restriction_id: i64,
    /// When the block was created.
    pub created_at: DateTime<Utc>,
    /// When the block was last modified.
    pub updated_at: DateTime<Utc>,
}

impl RoomRestriction {
    /// The blocked range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if the stored dates are
    /// not a forward interval.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for RoomRestriction {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .int("room_id", self.room_id)
            .optional_int("reservation_id", self.reservation_id)
            .int("restriction_id", self.restriction_id)
            .timestamp("created_at", &self.created_at)
            .timestamp("updated_at", &self.updated_at)
            .finish()
    }
}

impl Unmarshal for RoomRestriction {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        r.int("room_id", &mut self.room_id)?;
        r.optional_int("reservation_id", &mut self.reservation_id)?;
        r.int("restriction_id", &mut self.restriction_id)?;
        r.timestamp("created_at", &mut self.created_at)?;
        r.timestamp("updated_at", &mut self.updated_at)?;
        Ok(())
    }
}
