//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod config_cmd;
pub mod groups;
pub mod scorables;
pub mod scores;
pub mod session;
pub mod users;
pub mod util;
pub mod watch;

use scoreboard_core::Scoreboard;
use scoreboard_core::api::CurrentUser;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
///
/// `user` is what `current_user` reported when the session connected.
pub async fn dispatch(
    cmd: Command,
    session: &Scoreboard,
    user: &CurrentUser,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login => session::login(session, user, global),
        Command::Whoami => session::whoami(user, global),
        Command::LastChanged => session::last_changed(session, global).await,
        Command::Users(args) => users::handle(session, args, global).await,
        Command::Groups(args) => groups::handle(session, args, global).await,
        Command::Scorables(args) => scorables::handle(session, args, global).await,
        Command::Scores(args) => scores::handle(session, args, global).await,
        Command::Watch { scorable, limit } => watch::handle(session, scorable, limit, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
