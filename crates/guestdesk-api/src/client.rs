// Hand-crafted async HTTP client for the guest-management REST backend.
//
// Base path: /api/
// Auth: `Authorization: Token <key>` default header

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

// ── Error response shapes from the backend ───────────────────────────

/// DRF error bodies come as `{detail}`, `{error}` or `{message}`; form
/// endpoints return a field→messages map instead.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the guest-management backend.
///
/// Holds a pre-authenticated `reqwest::Client` and the normalized base URL
/// (always ending in `/api/`). One instance per session; cheap to clone the
/// inner parts via the per-entity endpoint methods in [`crate::endpoints`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a session token and transport config.
    ///
    /// Injects `Authorization: Token <key>` as a default header on every
    /// request.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_authenticated(token)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    /// Normalize the base URL so it always ends with `/api/`.
    ///
    /// Accepts `https://host`, `https://host/`, and `https://host/api`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }
        Ok(url)
    }

    /// Join a relative path (e.g. `"rooms/"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/`, so joining `rooms/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    pub(crate) async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::SessionExpired;
        }

        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: Self::error_message(&raw, status),
        }
    }

    /// Extract a human-readable message from whatever error body the
    /// backend produced.
    fn error_message(raw: &str, status: StatusCode) -> String {
        if let Ok(body) = serde_json::from_str::<ErrorBody>(raw) {
            if let Some(msg) = body.detail.or(body.error).or(body.message) {
                return msg;
            }
        }
        // DRF field-error map: {"field": ["msg", ...], ...}
        if let Ok(map) =
            serde_json::from_str::<std::collections::BTreeMap<String, Vec<String>>>(raw)
        {
            let flattened: Vec<String> = map
                .into_iter()
                .map(|(field, msgs)| format!("{field}: {}", msgs.join("; ")))
                .collect();
            if !flattened.is_empty() {
                return flattened.join(", ");
            }
        }
        if raw.is_empty() {
            status.to_string()
        } else {
            raw.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let client =
            ApiClient::from_reqwest("http://localhost:8000", reqwest::Client::new()).expect("url");
        assert_eq!(client.base_url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn base_url_with_api_is_untouched() {
        let client = ApiClient::from_reqwest("http://localhost:8000/api/", reqwest::Client::new())
            .expect("url");
        assert_eq!(client.base_url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn field_error_map_is_flattened() {
        let msg = ApiClient::error_message(
            r#"{"email": ["Enter a valid email address."], "name": ["This field is required."]}"#,
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(
            msg,
            "email: Enter a valid email address., name: This field is required."
        );
    }
}
