//! Operator account commands.

use crate::error::CliError;
use crate::utils::{form, open_app, GlobalOptions};
use bookings::codec::decode;
use bookings::{AuthenticateUserParams, CreateUserParams};
use clap::{Args, Subcommand};

/// Manage operator accounts.
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserAction {
    /// Create an operator account
    Add {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Login email
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long, env = "BOOKINGS_PASSWORD", hide_env_values = true)]
        password: String,

        /// Access level
        #[arg(long, default_value_t = 1)]
        access_level: i64,
    },

    /// Log in and remember the user in the session
    Login {
        /// Login email
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long, env = "BOOKINGS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the logged-in user
    Logout,
}

impl UserCommand {
    /// Execute the user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();

        match self.action {
            UserAction::Add {
                first_name,
                last_name,
                email,
                password,
                access_level,
            } => {
                let params: CreateUserParams = decode(&form([
                    ("first_name", Some(first_name)),
                    ("last_name", Some(last_name)),
                    ("email", Some(email)),
                    ("password", Some(password)),
                    ("access_level", Some(access_level.to_string())),
                ]))?;
                let user = app.database().create_user(&ctx, &params)?;
                println!("{}", user.id);
            }
            UserAction::Login { email, password } => {
                let params: AuthenticateUserParams =
                    decode(&form([("email", Some(email)), ("password", Some(password))]))?;
                let user = app.database().authenticate_user(&ctx, &params)?;

                let mut session = app.load_session()?;
                session.set_user_id(user.id);
                app.save_session(&session)?;
                if !global.quiet {
                    println!("Logged in as {}", user.email);
                }
            }
            UserAction::Logout => {
                let mut session = app.load_session()?;
                session.clear_user_id();
                app.save_session(&session)?;
            }
        }
        Ok(())
    }
}
