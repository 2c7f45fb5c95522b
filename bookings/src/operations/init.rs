//! Data directory initialization.
//!
//! Creates the data directory, a fresh database with the restriction catalog
//! seeded, and optionally a commented default configuration file.

use std::fs;
use std::path::PathBuf;

use crate::config::CONFIG_FILE;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# Bookings configuration file
# Environment variables (BOOKINGS_*) override these values.

# Deadline for each storage call, in milliseconds (default: 3000)
# request_timeout_ms: 3000

# Length of generated reservation codes, 6 to 32 (default: 10)
# reservation_code_length: 10

# Rooms per listing page, 1 to 1000 (default: 50)
# page_size: 50

# Output format for list commands: table, json or csv (default: table)
# output_format: table

# database:
#   busy_timeout_ms: 5000

# pool:
#   max_connections: 10
#   idle_timeout_secs: 5
#   max_lifetime_secs: 300
#   connection_timeout_secs: 3
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database cannot be initialized
/// - The configuration file cannot be written
/// - Overwrite is false and the database already exists
///
/// # Examples
///
/// ```no_run
/// use bookings::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/bookings-demo"))
///     .with_create_config(true);
///
/// let result = init_database(&options).unwrap();
/// println!("Database created: {}", result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    let db_exists = db_path.exists();

    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                db_path.display()
            ),
        });
    }

    if db_exists {
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::info!("initialized database at {}", db_path.display());

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::context::RequestContext;
    use tempfile::TempDir;

    #[test]
    fn test_init_fresh_directory() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bookings");

        let result = init_database(&InitOptions::new(data_dir.clone())).unwrap();

        assert!(result.data_dir_created);
        assert!(result.database_created);
        assert!(!result.config_created);
        assert!(data_dir.join(DATABASE_FILE).exists());

        let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE))).unwrap();
        assert_eq!(db.list_restrictions(&RequestContext::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_init_with_config_parses() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bookings");

        let options = InitOptions::new(data_dir.clone()).with_create_config(true);
        let result = init_database(&options).unwrap();
        assert!(result.config_created);

        let config = ConfigLoader::load_file(&data_dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(config, crate::config::Config::default());
    }

    #[test]
    fn test_init_fails_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bookings");
        init_database(&InitOptions::new(data_dir.clone())).unwrap();

        match init_database(&InitOptions::new(data_dir)) {
            Err(Error::Validation { field, message }) => {
                assert_eq!(field, "database");
                assert!(message.contains("--overwrite"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_init_with_overwrite_starts_empty() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bookings");
        init_database(&InitOptions::new(data_dir.clone())).unwrap();
        {
            let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE))).unwrap();
            db.create_restriction(&RequestContext::default(), "maintenance")
                .unwrap();
        }

        let result =
            init_database(&InitOptions::new(data_dir.clone()).with_overwrite(true)).unwrap();
        assert!(!result.data_dir_created);

        let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE))).unwrap();
        assert_eq!(db.list_restrictions(&RequestContext::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_init_config_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bookings");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(data_dir.join(CONFIG_FILE), "page_size: 5\n").unwrap();

        let options = InitOptions::new(data_dir.clone()).with_create_config(true);
        let result = init_database(&options).unwrap();

        assert!(!result.config_created);
        assert_eq!(
            fs::read_to_string(data_dir.join(CONFIG_FILE)).unwrap(),
            "page_size: 5\n"
        );
    }
}
