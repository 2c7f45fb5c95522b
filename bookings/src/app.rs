//! Explicit application context.
//!
//! [`AppContext`] bundles resolved [`Settings`] with an open [`Database`] and
//! hands out the components built from them. Callers create one and pass it
//! down; nothing here is global.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::context::RequestContext;
use crate::database::{Database, DATABASE_FILE};
use crate::error::{Error, Result};
use crate::operations::{AvailabilityOracle, BookingService};
use crate::session::{Session, SESSION_FILE};

/// Settings plus the store they configure.
///
/// # Examples
///
/// ```no_run
/// use bookings::config::Settings;
/// use bookings::{AppContext, ListRoomsParams};
///
/// let app = AppContext::open("/tmp/bookings-demo", Settings::default()).unwrap();
/// let ctx = app.request_context();
/// let page = ListRoomsParams { limit: 20, offset: 0 };
/// let rooms = app.database().list_rooms(&ctx, &page).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    data_dir: PathBuf,
    settings: Settings,
    db: Database,
}

impl AppContext {
    /// Opens the database inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] if the directory is missing
    /// and auto-initialization is disabled, or any error from opening the
    /// database.
    pub fn open(data_dir: impl AsRef<Path>, settings: Settings) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        if settings.disable_autoinit && !data_dir.exists() {
            return Err(Error::DataDirectoryNotFound { path: data_dir });
        }
        let db = Database::open(settings.database_config(data_dir.join(DATABASE_FILE)))?;
        Ok(Self {
            data_dir,
            settings,
            db,
        })
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The resolved settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The open database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// A fresh request context with the configured deadline.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        self.settings.request_context()
    }

    /// An availability oracle over the database.
    #[must_use]
    pub fn oracle(&self) -> AvailabilityOracle<&Database> {
        AvailabilityOracle::new(&self.db)
    }

    /// A booking service using the configured code length and page size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the configured code length is out of
    /// range.
    pub fn booking_service(&self) -> Result<BookingService<&Database>> {
        Ok(BookingService::new(&self.db, self.settings.code_generator()?)
            .with_page_size(self.settings.page_size))
    }

    /// Where the session file lives.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// Loads the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be read.
    pub fn load_session(&self) -> Result<Session> {
        Session::load(&self.session_path())
    }

    /// Persists `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        session.save(&self.session_path())
    }
}
