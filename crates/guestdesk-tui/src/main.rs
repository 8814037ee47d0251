//! `guestdesk-tui` — terminal admin console for the hotel guest-management
//! backend.
//!
//! Built on [ratatui](https://ratatui.rs). One screen per admin entity
//! (orders, rooms, users, products), each running the shared list core:
//! fetch, filter/sort/paginate locally, mutate through modals, re-fetch.
//!
//! Logs are written to a file (default `/tmp/guestdesk-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use guestdesk_api::{ApiClient, TransportConfig};
use guestdesk_config as config;
use guestdesk_core::AdminService;

use crate::app::App;

/// Terminal admin console for hotel orders, rooms, staff, and products.
#[derive(Parser, Debug)]
#[command(name = "guestdesk-tui", version, about)]
struct Cli {
    /// Backend profile to use
    #[arg(short = 'p', long, env = "GUESTDESK_PROFILE")]
    profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(short = 's', long, env = "GUESTDESK_SERVER")]
    server: Option<String>,

    /// Session token (overrides keyring/profile)
    #[arg(long, env = "GUESTDESK_TOKEN", hide_env = true)]
    token: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/guestdesk-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("guestdesk_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("guestdesk-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Assemble the authenticated service from config + CLI overrides.
fn build_service(cli: &Cli) -> Result<AdminService> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(cli.profile.as_deref(), &cfg);

    let (server, token, transport) = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let token = match &cli.token {
            Some(token) => SecretString::from(token.clone()),
            None => config::resolve_token(profile, &profile_name)?,
        };
        let server = cli.server.clone().unwrap_or_else(|| profile.server.clone());
        (server, token, config::transport_for(profile, &cfg.defaults))
    } else {
        let server = cli
            .server
            .clone()
            .ok_or_else(|| eyre!("no backend configured -- run `guestdesk config init` first"))?;
        let token = cli.token.clone().map(SecretString::from).ok_or_else(|| {
            eyre!("no session token -- run `guestdesk auth login` or pass --token")
        })?;
        (server, token, TransportConfig::default())
    };

    let api = ApiClient::from_token(&server, &token, &transport)?;
    Ok(AdminService::new(api))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Resolve the session before touching the terminal so configuration
    // errors print normally.
    let service = build_service(&cli)?;

    info!(
        profile = cli.profile.as_deref().unwrap_or("(default)"),
        "starting guestdesk-tui"
    );

    let mut app = App::new(Arc::new(service));
    app.run().await?;

    Ok(())
}
