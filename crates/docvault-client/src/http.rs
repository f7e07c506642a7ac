//! Bearer-token HTTP client over the vault REST API.
//!
//! Every request carries `Authorization: Bearer <token>`; token resolution
//! failing short-circuits with `NotAuthenticated` before anything is sent,
//! so a signed-out session never emits a request. JSON bodies get an
//! explicit content type; multipart envelopes keep their own boundary.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthTokenHolder;
use crate::error::ClientError;
use crate::types::{ApiErrorBody, DownloadedFile};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("docvault-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including the `/api` prefix, no trailing slash.
    pub base_url: String,
    /// Transport-level timeout. The client enforces nothing beyond this.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<AuthTokenHolder>,
}

impl HttpClient {
    /// Build a client over the given token holder.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` when the underlying client cannot
    /// be constructed.
    pub fn new(cfg: &ClientConfig, tokens: Arc<AuthTokenHolder>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn bearer(&self) -> Result<String, ClientError> {
        let token = self.tokens.token().await?;
        Ok(format!("Bearer {token}"))
    }

    /// Issue a JSON request and parse the JSON response.
    ///
    /// # Errors
    ///
    /// `Remote` for a non-2xx status (message taken from the body's
    /// `{message}` when present), `Transport` for a network failure,
    /// `NotAuthenticated` when no token can be resolved.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let bearer = self.bearer().await?;
        debug!(%method, path, "api request");

        let mut req = self
            .http
            .request(method, self.url(path))
            .header("Authorization", bearer);

        if let Some(ref body) = body {
            req = req.header("Content-Type", "application/json").json(body);
        }

        let resp = req.send().await.map_err(ClientError::Transport)?;
        Self::parse_json(resp).await
    }

    /// Issue a multipart request. The content type (with its boundary) is
    /// delegated entirely to the multipart envelope.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let bearer = self.bearer().await?;
        debug!(path, "multipart request");

        let resp = self
            .http
            .post(self.url(path))
            .header("Authorization", bearer)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::parse_json(resp).await
    }

    /// Fetch a binary resource, capturing the content type and the file
    /// name from `content-disposition` when the server provides them.
    pub(crate) async fn fetch_binary(&self, path: &str) -> Result<DownloadedFile, ClientError> {
        let bearer = self.bearer().await?;
        debug!(path, "binary request");

        let resp = self
            .http
            .get(self.url(path))
            .header("Authorization", bearer)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::remote_error(status, &body));
        }

        let mime_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let file_name = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_disposition);

        let bytes = resp.bytes().await.map_err(ClientError::Transport)?;
        Ok(DownloadedFile {
            bytes: bytes.to_vec(),
            mime_type,
            file_name,
        })
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await.map_err(ClientError::Transport)?;

        if status.is_success() {
            if body.is_empty() {
                // Some mutation endpoints answer 2xx with no body.
                return serde_json::from_str("{}").map_err(ClientError::Json);
            }
            return serde_json::from_str(&body).map_err(ClientError::Json);
        }

        Err(Self::remote_error(status, &body))
    }

    fn remote_error(status: StatusCode, body: &str) -> ClientError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        ClientError::Remote {
            status: status.as_u16(),
            message,
        }
    }
}

/// Extract the file name from a `content-disposition` header value.
///
/// Handles both `filename="passport.pdf"` and the bare `filename=x` form.
pub fn parse_content_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let rest = rest.trim();
    let name = if let Some(stripped) = rest.strip_prefix('"') {
        stripped.split('"').next()?
    } else {
        rest.split(';').next()?.trim()
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_owned())
    }
}
