//! Configuration commands: init, show, path.

use dialoguer::{Confirm, Input};

use guestdesk_config as config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config()?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(config::active_profile_name(global.profile.as_deref(), &cfg))
        .interact_text()
        .map_err(io_to_validation)?;

    let existing = cfg.profiles.get(&profile_name);
    let server: String = Input::new()
        .with_prompt("Backend URL")
        .default(
            existing
                .map(|p| p.server.clone())
                .unwrap_or_else(|| "http://localhost:8000".into()),
        )
        .interact_text()
        .map_err(io_to_validation)?;

    let email: String = Input::new()
        .with_prompt("Staff e-mail (blank to skip)")
        .allow_empty(true)
        .default(existing.and_then(|p| p.email.clone()).unwrap_or_default())
        .interact_text()
        .map_err(io_to_validation)?;

    cfg.profiles.insert(
        profile_name.clone(),
        config::Profile {
            server,
            email: (!email.is_empty()).then_some(email),
            token: None,
            token_env: None,
            insecure: None,
            timeout: None,
        },
    );

    if cfg.default_profile.as_deref() != Some(&profile_name) {
        let make_default = Confirm::new()
            .with_prompt(format!("Make '{profile_name}' the default profile?"))
            .default(true)
            .interact()
            .unwrap_or(false);
        if make_default {
            cfg.default_profile = Some(profile_name.clone());
        }
    }

    config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!(
            "Profile '{profile_name}' saved to {}",
            config::config_path().display()
        );
        eprintln!("Next: guestdesk auth login --profile {profile_name}");
    }
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::BadResponse {
        message: e.to_string(),
    })?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn io_to_validation(err: dialoguer::Error) -> CliError {
    CliError::Validation {
        details: err.to_string(),
    }
}
