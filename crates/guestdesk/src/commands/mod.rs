//! Command dispatch.

pub mod auth;
pub mod categories;
pub mod config_cmd;
pub mod orders;
pub mod products;
pub mod rooms;
pub mod users;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Orders(args) => orders::handle(args, global).await,
        Command::Rooms(args) => rooms::handle(args, global).await,
        Command::Users(args) => users::handle(args, global).await,
        Command::Products(args) => products::handle(args, global).await,
        Command::Categories(args) => categories::handle(args, global).await,
        Command::Auth(args) => auth::handle(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions handled in main before dispatch.
        Command::Completions(_) => Ok(()),
    }
}
