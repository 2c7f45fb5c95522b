//! `bookings completions`: print a shell completion script.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

const BIN_NAME: &str = "bookings";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        match self.output {
            Some(ref path) => {
                let mut file = File::create(path)?;
                generate(self.shell, &mut cmd, BIN_NAME, &mut file);
                file.flush()?;
                if !global.quiet {
                    eprintln!("Wrote {} completions to {}", self.shell, path.display());
                }
            }
            None => {
                if !global.quiet {
                    if let Some(hint) = install_hint(self.shell) {
                        eprintln!("# To enable completions: {hint}");
                    }
                }
                generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
            }
        }

        Ok(())
    }
}

/// Where each shell looks for completion scripts.
fn install_hint(shell: Shell) -> Option<String> {
    let hint = match shell {
        Shell::Bash => format!(
            "{BIN_NAME} completions bash -o ~/.local/share/bash-completion/completions/{BIN_NAME}"
        ),
        Shell::Zsh => format!("{BIN_NAME} completions zsh -o ~/.zsh/completions/_{BIN_NAME}"),
        Shell::Fish => {
            format!("{BIN_NAME} completions fish -o ~/.config/fish/completions/{BIN_NAME}.fish")
        }
        Shell::PowerShell => {
            format!("{BIN_NAME} completions powershell | Out-String | Invoke-Expression")
        }
        _ => return None,
    };
    Some(hint)
}
