//! Typed session store.
//!
//! Each [`SessionKey`] has exactly one payload type, fixed by the
//! [`SessionValue`] variant that carries it. Values are inserted through
//! [`Session::put`], which derives the key from the value, so a lookup can
//! never find a payload of the wrong type.
//!
//! The session serializes to JSON so a caller can keep it between
//! invocations (see [`Session::load`] and [`Session::save`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::error::Result;
use crate::model::Reservation;

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Slots a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKey {
    /// The reservation just booked, awaiting its summary.
    Reservation,
    /// The dates of the last availability search.
    SearchRange,
    /// A one-shot informational message.
    Flash,
    /// A one-shot warning.
    Warning,
    /// A one-shot error message.
    Error,
    /// The authenticated user.
    UserId,
}

/// A session payload tagged with its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum SessionValue {
    /// See [`SessionKey::Reservation`].
    Reservation(Reservation),
    /// See [`SessionKey::SearchRange`].
    SearchRange(DateRange),
    /// See [`SessionKey::Flash`].
    Flash(String),
    /// See [`SessionKey::Warning`].
    Warning(String),
    /// See [`SessionKey::Error`].
    Error(String),
    /// See [`SessionKey::UserId`].
    UserId(i64),
}

impl SessionValue {
    /// The slot this value belongs in.
    #[must_use]
    pub const fn key(&self) -> SessionKey {
        match self {
            Self::Reservation(_) => SessionKey::Reservation,
            Self::SearchRange(_) => SessionKey::SearchRange,
            Self::Flash(_) => SessionKey::Flash,
            Self::Warning(_) => SessionKey::Warning,
            Self::Error(_) => SessionKey::Error,
            Self::UserId(_) => SessionKey::UserId,
        }
    }
}

/// Per-user state carried between requests.
///
/// # Examples
///
/// ```
/// use bookings::{Reservation, Session};
///
/// let mut session = Session::new();
/// session.put_reservation(Reservation { code: "1A2B3C4D5E".into(), ..Default::default() });
/// session.put_flash("Reservation saved");
///
/// assert_eq!(session.reservation().map(|r| r.code.as_str()), Some("1A2B3C4D5E"));
/// assert_eq!(session.take_flash().as_deref(), Some("Reservation saved"));
/// assert!(session.take_flash().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SessionValue>", into = "Vec<SessionValue>")]
pub struct Session {
    values: BTreeMap<SessionKey, SessionValue>,
}

impl From<Vec<SessionValue>> for Session {
    fn from(values: Vec<SessionValue>) -> Self {
        let mut session = Self::new();
        for value in values {
            session.put(value);
        }
        session
    }
}

impl From<Session> for Vec<SessionValue> {
    fn from(session: Session) -> Self {
        session.values.into_values().collect()
    }
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the session at `path`. A missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a serialization
    /// error if it is not a valid session document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes the session to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, contents)?;
        fs::rename(&staging, path)?;
        Ok(())
    }

    /// Stores `value` in its slot, returning the value it replaced.
    pub fn put(&mut self, value: SessionValue) -> Option<SessionValue> {
        self.values.insert(value.key(), value)
    }

    /// Returns the value in `key`, if any.
    #[must_use]
    pub fn get(&self, key: SessionKey) -> Option<&SessionValue> {
        self.values.get(&key)
    }

    /// Removes and returns the value in `key`.
    pub fn remove(&mut self, key: SessionKey) -> Option<SessionValue> {
        self.values.remove(&key)
    }

    /// Whether `key` holds a value.
    #[must_use]
    pub fn contains(&self, key: SessionKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Whether the session holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Stores the reservation to summarize.
    pub fn put_reservation(&mut self, reservation: Reservation) {
        self.put(SessionValue::Reservation(reservation));
    }

    /// The reservation awaiting its summary.
    #[must_use]
    pub fn reservation(&self) -> Option<&Reservation> {
        match self.get(SessionKey::Reservation) {
            Some(SessionValue::Reservation(reservation)) => Some(reservation),
            _ => None,
        }
    }

    /// Removes and returns the reservation awaiting its summary.
    pub fn take_reservation(&mut self) -> Option<Reservation> {
        match self.remove(SessionKey::Reservation) {
            Some(SessionValue::Reservation(reservation)) => Some(reservation),
            _ => None,
        }
    }

    /// Remembers the dates of the last search.
    pub fn put_search_range(&mut self, range: DateRange) {
        self.put(SessionValue::SearchRange(range));
    }

    /// The dates of the last search.
    #[must_use]
    pub fn search_range(&self) -> Option<DateRange> {
        match self.get(SessionKey::SearchRange) {
            Some(SessionValue::SearchRange(range)) => Some(*range),
            _ => None,
        }
    }

    /// Queues an informational message.
    pub fn put_flash(&mut self, message: impl Into<String>) {
        self.put(SessionValue::Flash(message.into()));
    }

    /// The queued informational message, left in place.
    #[must_use]
    pub fn flash(&self) -> Option<&str> {
        match self.get(SessionKey::Flash) {
            Some(SessionValue::Flash(message)) => Some(message),
            _ => None,
        }
    }

    /// Removes and returns the queued informational message.
    pub fn take_flash(&mut self) -> Option<String> {
        match self.remove(SessionKey::Flash) {
            Some(SessionValue::Flash(message)) => Some(message),
            _ => None,
        }
    }

    /// Queues a warning.
    pub fn put_warning(&mut self, message: impl Into<String>) {
        self.put(SessionValue::Warning(message.into()));
    }

    /// Removes and returns the queued warning.
    pub fn take_warning(&mut self) -> Option<String> {
        match self.remove(SessionKey::Warning) {
            Some(SessionValue::Warning(message)) => Some(message),
            _ => None,
        }
    }

    /// Queues an error message.
    pub fn put_error(&mut self, message: impl Into<String>) {
        self.put(SessionValue::Error(message.into()));
    }

    /// Removes and returns the queued error message.
    pub fn take_error(&mut self) -> Option<String> {
        match self.remove(SessionKey::Error) {
            Some(SessionValue::Error(message)) => Some(message),
            _ => None,
        }
    }

    /// Records the authenticated user.
    pub fn set_user_id(&mut self, user_id: i64) {
        self.put(SessionValue::UserId(user_id));
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        match self.get(SessionKey::UserId) {
            Some(SessionValue::UserId(id)) => Some(*id),
            _ => None,
        }
    }

    /// Forgets the authenticated user.
    pub fn clear_user_id(&mut self) {
        self.remove(SessionKey::UserId);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        )
        .unwrap()
    }

    fn reservation() -> Reservation {
        Reservation {
            id: 4,
            code: "1A2B3C4D5E".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_value_keys() {
        assert_eq!(SessionValue::Flash("x".into()).key(), SessionKey::Flash);
        assert_eq!(SessionValue::UserId(1).key(), SessionKey::UserId);
        assert_eq!(
            SessionValue::SearchRange(range()).key(),
            SessionKey::SearchRange
        );
    }

    #[test]
    fn test_put_replaces_same_slot() {
        let mut session = Session::new();
        assert!(session.put(SessionValue::Flash("one".into())).is_none());
        let previous = session.put(SessionValue::Flash("two".into()));
        assert_eq!(previous, Some(SessionValue::Flash("one".into())));
        assert_eq!(session.flash(), Some("two"));
    }

    #[test]
    fn test_take_reservation_empties_slot() {
        let mut session = Session::new();
        session.put_reservation(reservation());
        assert!(session.contains(SessionKey::Reservation));
        assert_eq!(session.take_reservation().unwrap().code, "1A2B3C4D5E");
        assert!(session.take_reservation().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_message_slots_are_independent() {
        let mut session = Session::new();
        session.put_flash("saved");
        session.put_warning("check dates");
        session.put_error("room taken");

        assert_eq!(session.take_error().as_deref(), Some("room taken"));
        assert_eq!(session.take_warning().as_deref(), Some("check dates"));
        assert_eq!(session.take_flash().as_deref(), Some("saved"));
        assert!(session.is_empty());
    }

    #[test]
    fn test_user_id() {
        let mut session = Session::new();
        assert_eq!(session.user_id(), None);
        session.set_user_id(12);
        assert_eq!(session.user_id(), Some(12));
        session.clear_user_id();
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SESSION_FILE);

        let mut session = Session::new();
        session.put_reservation(reservation());
        session.put_search_range(range());
        session.set_user_id(3);
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.search_range(), Some(range()));
        assert!(!temp.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let session = Session::load(&temp.path().join(SESSION_FILE)).unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SESSION_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(Session::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_search_range() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SESSION_FILE);

        for (start, end) in [("2024-05-10", "2024-05-08"), ("2024-05-10", "2024-05-10")] {
            let json = format!(
                r#"[{{"key": "search_range", "value": {{"start": "{start}", "end": "{end}"}}}}]"#
            );
            fs::write(&path, json).unwrap();
            assert!(Session::load(&path).is_err(), "{start}..{end} loaded");
        }
    }

    #[test]
    fn test_json_shape() {
        let mut session = Session::new();
        session.set_user_id(9);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json, serde_json::json!([{"key": "user_id", "value": 9}]));
    }

    #[test]
    fn test_duplicate_slot_in_document_keeps_last() {
        let json = r#"[{"key": "flash", "value": "a"}, {"key": "flash", "value": "b"}]"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.flash(), Some("b"));
    }
}
