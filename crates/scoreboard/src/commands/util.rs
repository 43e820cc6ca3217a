//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Report a completed mutation on stderr unless `--quiet`.
pub fn report(message: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("{}", output::success(message, output::should_color(&global.color)));
    }
}

/// Short UTC timestamp for tables.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}
