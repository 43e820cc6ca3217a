//! User command handlers.

use secrecy::SecretString;

use scoreboard_core::Scoreboard;

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;

use super::util;

fn prompt_new_password() -> Result<String, CliError> {
    dialoguer::Password::new()
        .with_prompt("New password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()
        .map_err(|e| CliError::Validation {
            field: "password".into(),
            reason: format!("prompt failed: {e}"),
        })
}

pub async fn handle(
    session: &Scoreboard,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::Upsert { name, new_password } => {
            let password = match new_password {
                Some(pw) => pw,
                None => prompt_new_password()?,
            };
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            session
                .api()
                .upsert_user(name.as_deref(), &SecretString::from(password))
                .await?;
            util::report(
                &match name {
                    Some(name) => format!("User '{name}' saved"),
                    None => "Password changed".into(),
                },
                global,
            );
            Ok(())
        }

        UsersCommand::Delete { name } => {
            if !util::confirm(&format!("Delete user '{name}'?"), "users delete", global.yes)? {
                return Ok(());
            }
            session.api().delete_user(&name).await?;
            util::report(&format!("User '{name}' deleted"), global);
            Ok(())
        }
    }
}
