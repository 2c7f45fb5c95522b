use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::Result;

/// Access level of an operator account.
pub type AccessLevel = i64;

/// An operator account.
///
/// The password hash is never part of the marshalled field map.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Login email, unique across users.
    pub email: String,
    /// PHC-formatted password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Access level; higher values grant more.
    pub access_level: AccessLevel,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("access_level", &self.access_level)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

impl Marshal for User {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name)
            .text("email", &self.email)
            .int("access_level", self.access_level)
            .timestamp("created_at", &self.created_at)
            .timestamp("updated_at", &self.updated_at)
            .finish()
    }
}

impl Unmarshal for User {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("first_name", &mut self.first_name);
        r.text("last_name", &mut self.last_name);
        r.text("email", &mut self.email);
        r.int("access_level", &mut self.access_level)?;
        r.timestamp("created_at", &mut self.created_at)?;
        r.timestamp("updated_at", &mut self.updated_at)?;
        Ok(())
    }
}
