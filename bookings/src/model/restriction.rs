use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::{Error, Result};

/// A reason a room can be blocked on the calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Store-assigned identifier.
    pub id: i64,
    /// Catalog name, e.g. `reservation`.
    pub name: String,
    /// When the restriction was created.
    pub created_at: DateTime<Utc>,
    /// When the restriction was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Marshal for Restriction {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("name", &self.name)
            .timestamp("created_at", &self.created_at)
            .timestamp("updated_at", &self.updated_at)
            .finish()
    }
}

impl Unmarshal for Restriction {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("name", &mut self.name);
        r.timestamp("created_at", &mut self.created_at)?;
        r.timestamp("updated_at", &mut self.updated_at)?;
        Ok(())
    }
}

/// The restriction kinds seeded into every store.
///
/// The discriminants match the identifiers assigned by the schema seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    /// Block created together with a guest reservation.
    Reservation = 1,
    /// Block placed by the property owner.
    OwnerBlock = 2,
}

impl RestrictionKind {
    /// Identifier of the seeded catalog row.
    #[must_use]
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Catalog name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::OwnerBlock => "owner block",
        }
    }

    /// Look up a kind by catalog identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for identifiers outside the seeded catalog.
    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            1 => Ok(Self::Reservation),
            2 => Ok(Self::OwnerBlock),
            _ => Err(Error::NotFound {
                resource: format!("restriction {id}"),
            }),
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
