use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use url::Url;

use crate::api::ApiResponse;
use crate::constants::endpoints;
use crate::models::{LoginResponse, RefreshToken};

/// Tokens held by a signed-in client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub token: String,
    pub refresh_token: String,
}

impl UserSession {
    /// Session from a successful login or refresh response.
    #[must_use]
    pub fn from_login(response: &LoginResponse) -> Option<Self> {
        if !response.flag {
            return None;
        }
        Some(Self {
            token: response.token.clone()?,
            refresh_token: response.refresh_token.clone()?,
        })
    }
}

/// JSON client bound to one server. Attaches the session's bearer token and,
/// on a 401, exchanges the refresh token once and retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    session: Arc<RwLock<Option<UserSession>>>,
    /// Serializes refreshes; the server keeps one refresh token per user.
    refresh_lock: Arc<Mutex<()>>,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).context("Invalid server URL")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("hrms/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            session: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn session(&self) -> Option<UserSession> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Option<UserSession>) {
        *self.session.write().await = session;
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid request path: {path}"))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let mut builder = self.client.request(method, url);
        if let Some(session) = self.session.read().await.as_ref() {
            builder = builder.bearer_auth(&session.token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder.send().await.context("Failed to reach HR server")
    }

    async fn request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut response = self.send(method.clone(), url.clone(), body).await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.refresh_session().await? {
            debug!(path, "Retrying after token refresh");
            response = self.send(method, url, body).await?;
        }

        Self::unwrap_envelope(response).await
    }

    /// Exchanges the stored refresh token. Returns whether a usable session
    /// is held afterwards. Concurrent callers share one exchange: whoever
    /// waits on the lock sees the session the first caller stored. A
    /// rejected refresh only clears the session it tried to renew.
    pub async fn refresh_session(&self) -> Result<bool> {
        let Some(current) = self.session().await else {
            return Ok(false);
        };

        let _guard = self.refresh_lock.lock().await;
        match self.session().await {
            None => return Ok(false),
            Some(latest) if latest != current => return Ok(true),
            Some(_) => {}
        }

        let url = self.url(&format!("{}/refresh-token", endpoints::AUTHENTICATION))?;
        let form = RefreshToken {
            token: current.refresh_token.clone(),
        };
        let response = self
            .client
            .post(url)
            .json(&form)
            .send()
            .await
            .context("Failed to reach HR server")?;

        let login: LoginResponse = Self::unwrap_envelope(response).await?;
        if let Some(session) = UserSession::from_login(&login) {
            self.set_session(Some(session)).await;
            return Ok(true);
        }

        warn!(message = %login.message, "Token refresh rejected");
        let mut session = self.session.write().await;
        if session.as_ref() == Some(&current) {
            *session = None;
        }
        Ok(false)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Unexpected response body (status {status})"))?;

        if !envelope.success {
            bail!(
                "Request failed ({status}): {}",
                envelope.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        envelope
            .data
            .ok_or_else(|| anyhow!("Response without data (status {status})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_under_base_path() {
        let client = HttpClient::new("http://localhost:5062/hr").unwrap();
        assert_eq!(
            client.url("api/branch").unwrap().as_str(),
            "http://localhost:5062/hr/api/branch"
        );
        assert_eq!(
            client.url("/api/branch/3").unwrap().as_str(),
            "http://localhost:5062/hr/api/branch/3"
        );
    }

    #[test]
    fn test_session_requires_both_tokens() {
        let ok = LoginResponse::issued("Login successfully", "jwt".into(), "refresh".into());
        assert_eq!(
            UserSession::from_login(&ok),
            Some(UserSession {
                token: "jwt".into(),
                refresh_token: "refresh".into(),
            })
        );
        assert_eq!(UserSession::from_login(&LoginResponse::fail("nope")), None);
    }
}
