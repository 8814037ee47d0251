// Shared transport configuration for building reqwest::Client instances.
//
// Authenticated and anonymous clients share timeout and TLS settings
// through this module, avoiding duplicated builder logic.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed certificates (development backends).
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a plain `reqwest::Client` from this config (no auth header).
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        self.builder()
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Build a `reqwest::Client` that attaches `Authorization: Token <key>`
    /// to every request, the scheme the backend's session tokens use.
    pub fn build_authenticated(
        &self,
        token: &SecretString,
    ) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        let value = format!("Token {}", token.expose_secret());
        let mut value = HeaderValue::from_str(&value).map_err(|e| {
            crate::error::Error::Authentication {
                message: format!("invalid token header value: {e}"),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, value);

        self.builder()
            .default_headers(headers)
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    fn builder(&self) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("guestdesk/", env!("CARGO_PKG_VERSION")));
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        builder
    }
}
