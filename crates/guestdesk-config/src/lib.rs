//! Shared configuration for the guestdesk CLI and TUI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext), and
//! translation into `guestdesk-api` transport settings. Both binaries
//! depend on this crate; the CLI adds flag-aware overrides on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use guestdesk_api::TransportConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    ProfileNotFound { profile: String },

    #[error("no session token for profile '{profile}' -- run `guestdesk auth login`")]
    NoToken { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8000").
    pub server: String,

    /// Staff e-mail used at login (stored for convenience).
    pub email: Option<String>,

    /// Session token (plaintext — prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the session token.
    pub token_env: Option<String>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "guestdesk", "guestdesk").map_or_else(
        || PathBuf::from(".guestdesk/config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the merged configuration: built-in defaults, then the TOML file,
/// then `GUESTDESK_*` environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (tests and `--config` overrides).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GUESTDESK_").split("__"));
    Ok(figment.extract()?)
}

/// Write the config back to disk, creating parent directories.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

const KEYRING_SERVICE: &str = "guestdesk";

/// Resolve the session token for a profile.
///
/// Priority: OS keyring, then the profile's `token_env` variable, then a
/// plaintext `token` in the config file.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    match keyring::Entry::new(KEYRING_SERVICE, profile_name).and_then(|e| e.get_password()) {
        Ok(token) => {
            debug!(profile = profile_name, "token resolved from keyring");
            return Ok(SecretString::from(token));
        }
        Err(keyring::Error::NoEntry) => {}
        Err(err) => debug!(profile = profile_name, error = %err, "keyring lookup failed"),
    }

    if let Some(ref var) = profile.token_env {
        if let Ok(token) = std::env::var(var) {
            debug!(profile = profile_name, var, "token resolved from environment");
            return Ok(SecretString::from(token));
        }
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        profile: profile_name.to_owned(),
    })
}

/// Store a fresh session token in the OS keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, profile_name)?.set_password(token)?;
    Ok(())
}

/// Remove the stored token (logout). Missing entries are not an error.
pub fn clear_token(profile_name: &str) -> Result<(), ConfigError> {
    match keyring::Entry::new(KEYRING_SERVICE, profile_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

// ── Session assembly ────────────────────────────────────────────────

/// Everything needed to build an authenticated `ApiClient`.
pub struct Session {
    pub server: String,
    pub token: SecretString,
    pub transport: TransportConfig,
}

/// Pick the active profile: explicit name, else the config's default,
/// else the literal "default".
pub fn active_profile_name(explicit: Option<&str>, config: &Config) -> String {
    explicit
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Assemble a [`Session`] for the named profile.
pub fn session_for(config: &Config, profile_name: &str) -> Result<Session, ConfigError> {
    let profile = config
        .profiles
        .get(profile_name)
        .ok_or_else(|| ConfigError::ProfileNotFound {
            profile: profile_name.to_owned(),
        })?;

    let token = resolve_token(profile, profile_name)?;
    Ok(Session {
        server: profile.server.clone(),
        token,
        transport: transport_for(profile, &config.defaults),
    })
}

/// Transport settings for a profile, falling back to global defaults.
pub fn transport_for(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        accept_invalid_certs: profile.insecure.unwrap_or(defaults.insecure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_from(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.timeout, 30);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn profiles_round_trip_through_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
default_profile = "hotel"

[defaults]
timeout = 10

[profiles.hotel]
server = "http://localhost:8000"
email = "admin@hotel.test"
token = "plaintext-token"
insecure = true
"#,
        );

        let config = load_config_from(&path).expect("load");
        assert_eq!(config.default_profile.as_deref(), Some("hotel"));
        let profile = config.profiles.get("hotel").expect("profile");
        assert_eq!(profile.server, "http://localhost:8000");

        let transport = transport_for(profile, &config.defaults);
        assert_eq!(transport.timeout, Duration::from_secs(10));
        assert!(transport.accept_invalid_certs);
    }

    #[test]
    fn active_profile_prefers_explicit_name() {
        let config = Config {
            default_profile: Some("hotel".into()),
            ..Config::default()
        };
        assert_eq!(active_profile_name(Some("staging"), &config), "staging");
        assert_eq!(active_profile_name(None, &config), "hotel");
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "hotel".into(),
            Profile {
                server: "http://localhost:8000".into(),
                email: None,
                token: None,
                token_env: Some("GUESTDESK_TOKEN".into()),
                insecure: None,
                timeout: None,
            },
        );
        save_config_to(&config, &path).expect("save");

        let reloaded = load_config_from(&path).expect("reload");
        let profile = reloaded.profiles.get("hotel").expect("profile");
        assert_eq!(profile.token_env.as_deref(), Some("GUESTDESK_TOKEN"));
    }
}
