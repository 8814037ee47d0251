//! Shared helpers for command handlers: connection assembly, list-query
//! construction, confirmation prompts, spinners, and CSV writing.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use guestdesk_api::{ApiClient, TransportConfig};
use guestdesk_config as config;
use guestdesk_core::{
    AdminService, DateRange, FilterSpec, ListQuery, PageSpec, SortSpec, StatusFilter,
};

use crate::cli::{GlobalOpts, ListOpts};
use crate::error::CliError;

// ── Connection ──────────────────────────────────────────────────────

/// Build an authenticated [`AdminService`] from config + global flags.
///
/// Flags override the profile; the token resolves from `--token`, then
/// the keyring/env/config chain for the active profile.
pub fn connect(global: &GlobalOpts) -> Result<AdminService, CliError> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(global.profile.as_deref(), &cfg);

    let (server, token, mut transport) = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let token = match &global.token {
            Some(token) => SecretString::from(token.clone()),
            None => config::resolve_token(profile, &profile_name)?,
        };
        let server = global.server.clone().unwrap_or_else(|| profile.server.clone());
        (server, token, config::transport_for(profile, &cfg.defaults))
    } else {
        // No profile — require explicit flags.
        let server = global.server.clone().ok_or(CliError::NoServer)?;
        let token = global
            .token
            .clone()
            .map(SecretString::from)
            .ok_or_else(|| CliError::NoToken {
                profile: profile_name.clone(),
            })?;
        (server, token, TransportConfig::default())
    };

    if global.insecure {
        transport.accept_invalid_certs = true;
    }
    if global.timeout != 30 {
        transport.timeout = Duration::from_secs(global.timeout);
    }

    let api = ApiClient::from_token(&server, &token, &transport)?;
    Ok(AdminService::new(api))
}

// ── List query assembly ─────────────────────────────────────────────

/// Translate `list`/`export` flags into the core query state.
pub fn list_query(opts: &ListOpts) -> ListQuery {
    let status = opts
        .status
        .as_deref()
        .filter(|s| !s.eq_ignore_ascii_case("all"))
        .map_or(StatusFilter::All, |s| StatusFilter::Code(s.to_owned()));

    ListQuery {
        filter: FilterSpec {
            query: opts.search.clone().unwrap_or_default(),
            status,
            date_range: DateRange::from(opts.range),
        },
        sort: SortSpec::new(opts.sort.clone(), opts.dir.into()),
        page: PageSpec {
            page: opts.page.max(1),
            page_size: opts.page_size.max(1),
        },
    }
}

/// Page spec for rendering: `--all` collapses pagination to one page.
pub fn render_page(opts: &ListOpts, total: usize) -> PageSpec {
    if opts.all {
        PageSpec {
            page: 1,
            page_size: total.max(1),
        }
    } else {
        PageSpec {
            page: opts.page.max(1),
            page_size: opts.page_size.max(1),
        }
    }
}

// ── Interaction ─────────────────────────────────────────────────────

/// Confirm a destructive action. `--yes` skips; non-interactive without
/// `--yes` declines.
pub fn confirm(action: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if global.yes {
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::ConfirmationDeclined {
            action: action.to_owned(),
        });
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("{action}?"))
        .default(false)
        .interact()
        .unwrap_or(false);
    if confirmed {
        Ok(())
    } else {
        Err(CliError::ConfirmationDeclined {
            action: action.to_owned(),
        })
    }
}

/// Spinner shown while a fetch is in flight (interactive stderr only).
pub fn spinner(global: &GlobalOpts, message: &str) -> Option<ProgressBar> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner().with_message(message.to_owned());
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}

/// Finish and erase a spinner, if one was shown.
pub fn finish(bar: Option<ProgressBar>) {
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
}

// ── CSV output ──────────────────────────────────────────────────────

/// Write CSV to `out` or stdout; reports the destination on stderr.
pub fn write_csv(
    csv: &str,
    rows: usize,
    out: Option<PathBuf>,
    entity: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match out {
        Some(path) => {
            std::fs::write(&path, csv)?;
            if !global.quiet {
                eprintln!("Exported {rows} {entity} to {}", path.display());
            }
        }
        None => print!("{csv}"),
    }
    Ok(())
}
