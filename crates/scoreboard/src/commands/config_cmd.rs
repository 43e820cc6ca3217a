//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use scoreboard_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, active_profile_name};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "poll_interval_ms = {}", cfg.defaults.poll_interval_ms);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(millis) = p.poll_interval_ms {
            let _ = writeln!(out, "poll_interval_ms = {millis}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Offer to store a password in the system keyring or return it for
/// plaintext config.
///
/// Returns `Some(password)` if the user chose plaintext, `None` if stored in
/// the keyring.
fn prompt_password_storage(
    password: String,
    profile_name: &str,
    color: bool,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_password(profile_name, &password)?;
        eprintln!("{}", output::success("Password stored in system keyring", color));
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            // An unreadable file must fail here, before it could be overwritten.
            let mut cfg = config::load_config()?;
            eprintln!("Scoreboard CLI configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Server URL, checked before anything is written
            let server: String = Input::new()
                .with_prompt("Server API URL")
                .default("http://localhost:8000/api".into())
                .validate_with(|input: &String| {
                    scoreboard_config::parse_server_url(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Optional login
            let username: String = Input::new()
                .with_prompt("Username (leave empty for anonymous)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let (username, password) = if username.is_empty() {
                (None, None)
            } else {
                let pass = Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(prompt_err)?;
                let stored = prompt_password_storage(pass, &profile_name, color)?;
                (Some(username), stored)
            };

            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    username,
                    password,
                    ..Profile::default()
                },
            );
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            config::save_config(&cfg)?;

            eprintln!(
                "{}",
                output::success(
                    &format!("Profile '{profile_name}' saved to {}", config_path.display()),
                    color
                )
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let active = active_profile_name(global, &cfg);
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            let lines: Vec<String> = names
                .into_iter()
                .map(|name| {
                    if name == active {
                        format!("* {name}")
                    } else {
                        format!("  {name}")
                    }
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
                names.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: names.join(", "),
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("{}", output::success(&format!("Default profile: {name}"), color));
            }
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| active_profile_name(global, &cfg));
            let password = Password::new()
                .with_prompt(format!("Password for profile '{profile_name}'"))
                .interact()
                .map_err(prompt_err)?;
            config::store_password(&profile_name, &password)?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(
                        &format!("Password for '{profile_name}' stored in system keyring"),
                        color
                    )
                );
            }
            Ok(())
        }
    }
}
