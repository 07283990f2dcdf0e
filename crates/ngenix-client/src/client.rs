//! Main NGENIX API client implementation.

use crate::api::{RecordsApi, ZonesApi};
use ngenix_core::{Credentials, NgenixError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The NGENIX v3 API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.ngenix.net/api/v3";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// NGENIX API client
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct NgenixClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
}

impl NgenixClient {
    /// Create a new client for the given account using default settings
    pub fn new(credentials: Credentials) -> Result<Self> {
        NgenixClientBuilder::new(credentials).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(credentials: Credentials) -> NgenixClientBuilder {
        NgenixClientBuilder::new(credentials)
    }

    /// Credentials every request is authenticated with
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access DNS zone endpoints
    #[must_use]
    pub fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access challenge record operations
    #[must_use]
    pub fn records(&self) -> RecordsApi<'_> {
        RecordsApi::new(self)
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.request(Method::GET, path).query(params);
        debug!(path, "GET request");

        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// Perform a PATCH request with JSON body
    pub(crate) async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::PATCH, path).json(body);
        debug!(path, "PATCH request");

        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Start an authenticated request
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let credentials = &self.inner.credentials;
        self.inner
            .http
            .request(method, self.build_url(path))
            .basic_auth(credentials.basic_auth_user(), Some(credentials.token()))
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url.trim_end_matches('/'), path)
    }

    /// Classify a transport failure
    fn transport_error(&self, err: &reqwest::Error) -> NgenixError {
        if err.is_timeout() {
            NgenixError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            NgenixError::Connection(err.to_string())
        } else {
            NgenixError::Http(err.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(NgenixError::Json)
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to an `NgenixError`
    async fn handle_error(status: u16, response: reqwest::Response) -> NgenixError {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(|e| e.as_str()).map(String::from))
            })
            .unwrap_or(body);

        match status {
            401 | 403 => NgenixError::Unauthorized,
            404 => NgenixError::NotFound { resource: url },
            429 => {
                warn!("Rate limited by NGENIX API");
                NgenixError::RateLimited { retry_after }
            }
            _ => NgenixError::Api {
                code: status,
                message,
            },
        }
    }
}

impl std::fmt::Debug for NgenixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NgenixClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring an [`NgenixClient`]
pub struct NgenixClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl NgenixClientBuilder {
    /// Create a new builder for the given account
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("certbot-dns-ngenix/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<NgenixClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| NgenixError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(NgenixClient {
            inner: Arc::new(ClientInner {
                http,
                credentials: self.credentials,
                base_url: self.base_url,
                timeout: self.timeout,
            }),
        })
    }
}
