//! Request core: bearer injection, envelope parsing, one-shot token refresh.

use std::sync::Arc;

use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::session::{SessionManager, SessionStore};

use super::error::{self, ApiError};

/// Response envelope used by every platform endpoint.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated API client.
///
/// Explicitly constructed rather than a process-wide singleton; clones share
/// the session manager and the in-flight refresh gate, so any number of
/// concurrent calls coordinate through the same state.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Creates a client for the given base URL and session store.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Result<Self, ApiError> {
        // Cookie jar kept so requests carry cookies alongside the bearer token.
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Arc::new(SessionManager::new(store)),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Creates a client from config: resolved base URL, default session path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.resolve_base_url()?;
        Ok(Self::new(base_url, SessionStore::open_default())?)
    }

    /// The session manager owning this client's credentials.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Performs a request, transparently attaching credentials and recovering
    /// from access-token expiry.
    ///
    /// Authorization failures trigger exactly one refresh-and-retry attempt,
    /// never a loop. If recovery fails the session is torn down before the
    /// error is returned.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // The persisted copy may have changed out of band (another process);
        // reconcile before attaching the token.
        let session = self.session.reload().map_err(ApiError::storage)?;
        let token = session.map(|session| session.token);

        let response = self
            .send(method.clone(), path, body, token.as_deref())
            .await?;
        let status = response.status();
        if status != StatusCode::UNAUTHORIZED {
            return Self::parse_response(response).await;
        }

        let denied = Self::read_error_message(response).await?;
        debug!(path, "unauthorized response, attempting token refresh");

        let Some(fresh) = self.obtain_fresh_token(token.as_deref()).await else {
            self.teardown()?;
            return Err(ApiError::Unauthorized { message: denied });
        };

        let retried = match self.send(method, path, body, Some(&fresh)).await {
            Ok(retried) => retried,
            Err(err) => {
                self.teardown()?;
                return Err(ApiError::Unauthorized {
                    message: err.to_string(),
                });
            }
        };

        if retried.status().is_success() {
            return Self::parse_response(retried).await;
        }

        let message = Self::read_error_message(retried).await?;
        self.teardown()?;
        Err(ApiError::Unauthorized { message })
    }

    /// Coalesces concurrent refresh attempts into one in-flight operation.
    ///
    /// Waiters on the gate re-read the persisted token and adopt it when it
    /// rotated while they waited. Returns `None` when recovery is impossible
    /// (no refresh token, refresh rejected, or the refresh call itself
    /// failed), which the caller turns into a teardown.
    async fn obtain_fresh_token(&self, stale: Option<&str>) -> Option<String> {
        let _gate = self.refresh_gate.lock().await;

        let current = match self.session.reload() {
            Ok(session) => session?,
            Err(err) => {
                warn!("failed to reload session before refresh: {err:#}");
                return None;
            }
        };

        if stale != Some(current.token.as_str()) && !current.token.is_empty() {
            return Some(current.token);
        }

        let refresh_token = current.refresh_token?;
        match self.post_refresh(&refresh_token).await {
            Ok(token) => match self.session.rotate_access_token(&token) {
                Ok(()) => Some(token),
                Err(err) => {
                    warn!("failed to persist refreshed access token: {err:#}");
                    None
                }
            },
            Err(err) => {
                // Refresh failures, network errors included, fold into the
                // teardown path instead of reaching the caller directly.
                warn!("token refresh failed: {err}");
                None
            }
        }
    }

    /// Exchanges the refresh token for a new access token.
    async fn post_refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            #[serde(rename = "refreshToken")]
            refresh_token: &'a str,
        }

        #[derive(Deserialize)]
        struct RefreshData {
            token: String,
        }

        debug!("refreshing access token");
        let url = format!("{}/auth/refresh", self.base_url);
        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error::server_message(status, &body),
            });
        }

        let envelope: ApiEnvelope<RefreshData> =
            serde_json::from_str(&body).map_err(ApiError::Decode)?;
        match envelope.data {
            Some(data) if envelope.success => Ok(data.token),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message: error::server_message(status, &body),
            }),
        }
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await
    }

    /// Unwraps the `{ success, data }` envelope of a non-401 response.
    async fn parse_response<T>(response: reqwest::Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error::server_message(status, &body),
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        match envelope.data {
            Some(data) if envelope.success => Ok(data),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| error::server_message(status, &body)),
            }),
        }
    }

    async fn read_error_message(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(error::server_message(status, &body))
    }

    /// Clears both tokens and the cached identity. Idempotent.
    fn teardown(&self) -> Result<(), ApiError> {
        debug!("tearing down session");
        self.session.clear().map_err(ApiError::storage)?;
        Ok(())
    }
}
