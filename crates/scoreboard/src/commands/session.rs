//! Session command handlers: login, whoami, last-changed.

use serde::Serialize;

use scoreboard_core::Scoreboard;
use scoreboard_core::api::CurrentUser;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Marker<'a> {
    date: &'a str,
}

fn username_or_anonymous(user: &CurrentUser) -> String {
    user.username.clone().unwrap_or_else(|| "(not logged in)".into())
}

/// The session already logged in on connect; this only reports the result.
pub fn login(session: &Scoreboard, user: &CurrentUser, global: &GlobalOpts) -> Result<(), CliError> {
    if !session.is_logged_in() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "no username configured; pass --username or set one in the profile".into(),
        });
    }
    let out = output::render_single(
        &global.output,
        user,
        |u| format!("Logged in as {}", username_or_anonymous(u)),
        username_or_anonymous,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
pub fn whoami(user: &CurrentUser, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        &global.output,
        user,
        username_or_anonymous,
        username_or_anonymous,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn last_changed(session: &Scoreboard, global: &GlobalOpts) -> Result<(), CliError> {
    let marker = session.api().last_changed().await?;
    let out = output::render_single(
        &global.output,
        &Marker {
            date: marker.as_str(),
        },
        |m| m.date.to_owned(),
        |m| m.date.to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
