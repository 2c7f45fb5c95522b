//! Owner block commands.
//!
//! An owner block takes a room off the market for a date range without a
//! reservation behind it. It is subject to the same overlap rule as
//! bookings.

use crate::error::CliError;
use crate::utils::{form, open_app, output_format, print_records, FormatArg, GlobalOptions};
use bookings::codec::decode;
use bookings::{CreateRoomRestrictionParams, RestrictionKind};
use clap::{Args, Subcommand};

/// Manage owner blocks on rooms.
#[derive(Args)]
pub struct BlockCommand {
    #[command(subcommand)]
    pub action: BlockAction,
}

/// Block subcommands.
#[derive(Subcommand)]
pub enum BlockAction {
    /// Block a room for a date range
    Add {
        /// Room to block
        #[arg(long)]
        room_id: i64,

        /// First blocked night (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Day the block ends (YYYY-MM-DD, exclusive)
        #[arg(long)]
        end: String,
    },

    /// List every block on a room, reservations included
    List {
        /// Room to inspect
        #[arg(long)]
        room_id: i64,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Remove an owner block
    Remove {
        /// Block id
        id: i64,
    },
}

impl BlockCommand {
    /// Execute the block command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();
        let db = app.database();

        match self.action {
            BlockAction::Add {
                room_id,
                start,
                end,
            } => {
                let params: CreateRoomRestrictionParams = decode(&form([
                    ("room_id", Some(room_id.to_string())),
                    ("start_date", Some(start)),
                    ("end_date", Some(end)),
                    (
                        "restriction_id",
                        Some(RestrictionKind::OwnerBlock.id().to_string()),
                    ),
                ]))?;
                let block = db.create_room_restriction(&ctx, &params)?;
                println!("{}", block.id);
            }
            BlockAction::List { room_id, format } => {
                let blocks = db.list_room_restrictions(&ctx, room_id)?;
                print_records(output_format(format, app.settings()), &blocks)?;
            }
            BlockAction::Remove { id } => {
                if !db.delete_room_restriction(&ctx, id)? {
                    return Err(CliError::SemanticFailure(format!("Block {id} not found")));
                }
                if !global.quiet {
                    println!("Removed block {id}");
                }
            }
        }
        Ok(())
    }
}
