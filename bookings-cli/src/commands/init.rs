//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the bookings data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use bookings::config::CONFIG_FILE;
use bookings::database::DATABASE_FILE;
use bookings::operations::{init_database, InitOptions};
use clap::Args;
use std::path::PathBuf;

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "path", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Overwrite existing database
    #[arg(long)]
    pub overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    pub with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; this command is how a data
    /// directory comes to exist.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.path {
            Some(path) => path,
            None => resolve_data_dir(global)?,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize bookings in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE);
            if db_path.exists() {
                if self.overwrite {
                    println!("  - Remove existing database: {}", db_path.display());
                    println!("  - Create new database: {}", db_path.display());
                } else {
                    println!(
                        "  - ERROR: Database already exists (use --overwrite to replace): {}",
                        db_path.display()
                    );
                }
            } else {
                println!("  - Create database: {}", db_path.display());
            }

            if self.with_config {
                let config_path = data_dir.join(CONFIG_FILE);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);

        let result = init_database(&options).map_err(|e| match e {
            bookings::Error::Validation { message, .. } => CliError::SemanticFailure(message),
            other => CliError::from(other),
        })?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized bookings in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
