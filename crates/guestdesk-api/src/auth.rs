//! Login/logout endpoints and the session payload they produce.
//!
//! Login is the one call made without a session token, so it goes through
//! a plain (unauthenticated) client. The returned token is what
//! [`ApiClient::from_token`](crate::ApiClient::from_token) wants.

use std::collections::HashMap;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::client::ApiClient;
use crate::transport::TransportConfig;
use crate::Error;

/// Successful login response — a session token plus whatever account
/// fields the backend chose to include (name, role, user type).
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Catch-all for additional fields not modeled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(serde::Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// `POST /auth/login/` with staff credentials.
///
/// Non-2xx responses map to [`Error::Authentication`] — a failed login is
/// never a "session expired".
pub async fn login(
    base_url: &str,
    email: &str,
    password: &SecretString,
    transport: &TransportConfig,
) -> Result<AuthSession, Error> {
    let http = transport.build_client()?;
    let url = login_url(base_url)?;
    debug!("POST {url}");

    let resp = http
        .post(url)
        .json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("unexpected login response: {e}"),
            body,
        })
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
        let err = ApiClient::parse_error(status, resp).await;
        Err(Error::Authentication {
            message: err.to_string(),
        })
    } else {
        Err(ApiClient::parse_error(status, resp).await)
    }
}

impl ApiClient {
    /// `POST /auth/logout/` — invalidates the session token server-side.
    ///
    /// Callers typically treat failures here as best-effort: the local
    /// token is discarded either way.
    pub async fn logout(&self) -> Result<(), Error> {
        self.post_no_response("auth/logout/", &serde_json::json!({}))
            .await
    }
}

fn login_url(base_url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url)?;
    let path = url.path().trim_end_matches('/').to_owned();
    if path.ends_with("/api") {
        url.set_path(&format!("{path}/auth/login/"));
    } else {
        url.set_path(&format!("{path}/api/auth/login/"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_is_rooted_at_api() {
        let url = login_url("http://localhost:8000").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8000/api/auth/login/");
    }

    #[test]
    fn session_keeps_unmodeled_fields() {
        let session: AuthSession = serde_json::from_value(serde_json::json!({
            "token": "abc123",
            "name": "Desk Admin",
            "role": "ADMIN",
            "user_type": "staff"
        }))
        .expect("session");
        assert_eq!(session.token, "abc123");
        assert_eq!(session.extra.get("user_type"), Some(&Value::from("staff")));
    }
}
