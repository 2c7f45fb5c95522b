use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::Result;

/// A bookable room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name, unique across rooms.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Optional image shown next to the room.
    pub image_filename: Option<String>,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Marshal for Room {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("name", &self.name)
            .text("description", &self.description)
            .optional_text("image_filename", self.image_filename.as_deref())
            .timestamp("created_at", &self.created_at)
            .timestamp("updated_at", &self.updated_at)
            .finish()
    }
}

impl Unmarshal for Room {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("name", &mut self.name);
        r.text("description", &mut self.description);
        r.optional_text("image_filename", &mut self.image_filename);
        r.timestamp("created_at", &mut self.created_at)?;
        r.timestamp("updated_at", &mut self.updated_at)?;
        Ok(())
    }
}
