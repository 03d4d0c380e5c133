//! HTTP client with bearer authentication and single-flight token refresh.
//!
//! Every authenticated request carries the stored access token. When the API
//! answers `401 Unauthorized`, the client exchanges the stored refresh token
//! for a new access token exactly once and replays the request once with it.
//!
//! Refreshes are serialized behind an async mutex. A request that hits a 401
//! while another request is already refreshing waits for that refresh and then
//! replays with its result instead of starting a second one:
//!
//! ```text
//! request A ──401──► lock ─► POST refresh ─► store token ─► unlock ─► replay A
//! request B ──401──► lock (waits) ──────────────────────────► token changed ─► replay B
//! ```

use crate::api::session::SessionStore;
use crate::domain::error::{EventScoutError, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::Instrument;

/// Connection settings for the volunteer platform API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without a trailing path (e.g. `http://127.0.0.1:8000`).
    pub base_url: String,
    pub events_path: String,
    pub login_path: String,
    pub register_path: String,
    pub refresh_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            events_path: "/api/events/".to_string(),
            login_path: "/api/accounts/auth/token/".to_string(),
            register_path: "/api/accounts/register/".to_string(),
            refresh_path: "/api/accounts/auth/token/refresh/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Send the access token and refresh it on `401`.
    Bearer,
    /// Send no token; a `401` is returned as an ordinary API error.
    Anonymous,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Client for the volunteer platform API.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Http`] if the HTTP client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(config: ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            session,
            refresh_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Joins `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends an authenticated `GET` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Http`] on transport failure,
    /// [`EventScoutError::Api`] on a non-success status (including a second
    /// `401` after refreshing), and the refresh errors described on
    /// [`ApiClient::send`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None, Auth::Bearer).await
    }

    /// Sends a `POST` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(&body), auth).await
    }

    /// Sends a request, refreshing the access token and replaying once on `401`.
    ///
    /// # Errors
    ///
    /// In addition to transport and status errors:
    /// - [`EventScoutError::MissingRefreshToken`] if a `401` arrives and no
    ///   refresh token is stored
    /// - [`EventScoutError::RefreshRejected`] if the refresh endpoint refuses
    ///   the refresh token
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        auth: Auth,
    ) -> Result<T> {
        let url = self.url(path);
        let span = tracing::debug_span!("api_request", method = %method, url = %url);
        self.send_with_refresh(&method, &url, body, auth)
            .instrument(span)
            .await
    }

    async fn send_with_refresh<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&serde_json::Value>,
        auth: Auth,
    ) -> Result<T> {
        let token = match auth {
            Auth::Bearer => self.session.access_token()?,
            Auth::Anonymous => None,
        };

        let response = self.dispatch(method, url, body, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || auth == Auth::Anonymous {
            return Self::decode(response).await;
        }

        tracing::debug!("request unauthorized, refreshing access token");
        let fresh = self.refresh_after(token.as_deref()).await?;

        let replay = self.dispatch(method, url, body, Some(&fresh)).await?;
        Self::decode(replay).await
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> Result<Response> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }

    /// Obtains an access token newer than `stale`.
    ///
    /// Only one refresh runs at a time. If the stored token no longer equals
    /// `stale` once the lock is held, another request already refreshed and
    /// its token is returned without calling the API.
    async fn refresh_after(&self, stale: Option<&str>) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token()? {
            if stale != Some(current.as_str()) {
                tracing::debug!("access token already refreshed by another request");
                return Ok(current);
            }
        }

        let refresh = self
            .session
            .refresh_token()?
            .ok_or(EventScoutError::MissingRefreshToken)?;

        let span = tracing::debug_span!("token_refresh");
        let response = self
            .http
            .post(self.url(&self.config.refresh_path))
            .json(&RefreshRequest { refresh: &refresh })
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token refresh rejected");
            return Err(EventScoutError::RefreshRejected {
                status: status.as_u16(),
            });
        }

        let RefreshResponse { access } = response.json().await?;
        self.session.set_access_token(&access)?;
        tracing::debug!("access token refreshed");
        Ok(access)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventScoutError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
