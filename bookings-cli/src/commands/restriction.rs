//! Restriction catalog commands.

use crate::error::CliError;
use crate::utils::{open_app, output_format, print_records, FormatArg, GlobalOptions};
use clap::{Args, Subcommand};

/// Inspect and extend the restriction catalog.
#[derive(Args)]
pub struct RestrictionCommand {
    #[command(subcommand)]
    pub action: RestrictionAction,
}

/// Restriction subcommands.
#[derive(Subcommand)]
pub enum RestrictionAction {
    /// List restriction kinds
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Add a restriction kind
    Add {
        /// Unique name
        #[arg(long)]
        name: String,
    },
}

impl RestrictionCommand {
    /// Execute the restriction command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();

        match self.action {
            RestrictionAction::List { format } => {
                let restrictions = app.database().list_restrictions(&ctx)?;
                print_records(output_format(format, app.settings()), &restrictions)?;
            }
            RestrictionAction::Add { name } => {
                let restriction = app.database().create_restriction(&ctx, &name)?;
                println!("{}", restriction.id);
            }
        }
        Ok(())
    }
}
