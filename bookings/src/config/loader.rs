//! Configuration file discovery and loading.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the data directory.
///
/// # Examples
///
/// ```no_run
/// use bookings::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/tmp/bookings"))).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Only the user config `<data_dir>/config.yaml` exists today; it is
    /// returned at precedence 1. Without `data_dir` the default data
    /// directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = if let Some(dir) = data_dir {
            dir.join(CONFIG_FILE)
        } else {
            crate::database::default_data_dir()?.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Validation`] naming the file if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse YAML configuration text.
    ///
    /// A document with nothing but comments yields the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the YAML is invalid or names an
    /// unknown field.
    pub fn parse(contents: &str) -> Result<Config> {
        let blank = contents.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "page_size: 25\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.page_size, Some(25));
    }

    #[test]
    fn test_commented_template_is_empty_config() {
        let config = ConfigLoader::parse("# nothing set\n# page_size: 10\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_all_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let sources = ConfigLoader::load_all(Some(temp_dir.path())).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_load_all_reads_user_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "request_timeout_ms: 900\n").unwrap();

        let sources = ConfigLoader::load_all(Some(temp_dir.path())).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[0].config.request_timeout_ms, Some(900));
    }
}
