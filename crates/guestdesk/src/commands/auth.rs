//! Login/logout handlers — obtain a session token and keep it in the
//! OS keyring so every other command can attach it silently.

use dialoguer::Input;
use secrecy::SecretString;

use guestdesk_api::TransportConfig;
use guestdesk_config as config;

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { email } => login(email, global).await,
        AuthCommand::Logout => logout(global).await,
    }
}

async fn login(email: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(global.profile.as_deref(), &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let server = global
        .server
        .clone()
        .or_else(|| profile.map(|p| p.server.clone()))
        .ok_or(CliError::NoServer)?;

    let email = match email.or_else(|| profile.and_then(|p| p.email.clone())) {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Staff e-mail")
            .interact_text()
            .map_err(|e| CliError::Validation {
                details: format!("email: {e}"),
            })?,
    };
    let password = SecretString::from(rpassword::prompt_password("Password: ")?);

    let transport = profile.map_or_else(TransportConfig::default, |p| {
        config::transport_for(p, &cfg.defaults)
    });

    let session = guestdesk_api::auth::login(&server, &email, &password, &transport)
        .await
        .map_err(|e| match e {
            guestdesk_api::Error::Authentication { message } => CliError::AuthFailed { message },
            other => CliError::from(other),
        })?;

    config::store_token(&profile_name, &session.token)?;

    // Remember the server/e-mail so the next login is two keystrokes.
    let mut cfg = cfg;
    let entry = cfg
        .profiles
        .entry(profile_name.clone())
        .or_insert_with(|| config::Profile {
            server: server.clone(),
            email: None,
            token: None,
            token_env: None,
            insecure: None,
            timeout: None,
        });
    entry.server = server;
    entry.email = Some(email);
    config::save_config(&cfg)?;

    if !global.quiet {
        let who = session.name.as_deref().unwrap_or("staff");
        eprintln!("Signed in as {who} (profile '{profile_name}')");
    }
    Ok(())
}

async fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(global.profile.as_deref(), &cfg);

    // Best-effort server-side invalidation; the local token goes either way.
    if let Ok(service) = util::connect(global) {
        if let Err(err) = service.logout().await {
            tracing::debug!(error = %err, "server-side logout failed");
        }
    }

    config::clear_token(&profile_name)?;
    if !global.quiet {
        eprintln!("Signed out (profile '{profile_name}')");
    }
    Ok(())
}
