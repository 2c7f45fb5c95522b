//! Summary command implementation.

use crate::error::CliError;
use crate::utils::{open_app, output_format, print_records, FormatArg, GlobalOptions};
use clap::Args;

/// Show and clear the last booking held in the session.
#[derive(Args)]
pub struct SummaryCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl SummaryCommand {
    /// Execute the summary command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let mut session = app.load_session()?;

        let Some(reservation) = session.take_reservation() else {
            return Err(CliError::SemanticFailure(
                "No reservation in session".to_string(),
            ));
        };
        let flash = session.take_flash();
        app.save_session(&session)?;

        if let Some(message) = flash {
            if !global.quiet {
                eprintln!("{message}");
            }
        }
        print_records(output_format(self.format, app.settings()), &[reservation])
    }
}
