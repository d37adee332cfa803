//! HTTP client for page fetches
//!
//! Handles:
//! - Building the shared connection pool
//! - Issuing one GET per page attempt
//! - Classifying failures for the retry policy
//! - Decoding page bodies

use crate::error::{Error, Result};
use crate::pagination::PageSource;
use crate::retry::RetryPolicy;
use crate::types::{PageRequest, PageResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Root of the public Rick and Morty API
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Base URL the collection paths are joined onto
    pub base_url: String,
    /// Time allowed to establish a connection, per attempt
    pub connect_timeout: Duration,
    /// Longest wait for any single read of the response, per attempt
    pub read_timeout: Duration,
    /// Total attempts per page
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(2),
            max_retries: 5,
            retry_delay: Duration::from_secs(2),
            user_agent: format!("rickmorty-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Timeout that bounds a connect (`true`) or a single read (`false`)
    pub fn timeout_for(&self, connecting: bool) -> Duration {
        if connecting {
            self.connect_timeout
        } else {
            self.read_timeout
        }
    }

    /// Longest wait from sending a request to its response headers: the
    /// connect budget plus one read
    pub fn response_deadline(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }

    /// Retry policy described by this config
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set max attempts per page
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the delay between attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client shared by all concurrent page fetches.
///
/// `reqwest::Client` pools connections behind an `Arc`, so one instance
/// serves any number of simultaneous requests.
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and decode one page, exactly one attempt.
    pub async fn get_page(&self, request: &PageRequest) -> Result<PageResponse> {
        let url = request.url();
        debug!("GET {url}");

        let sent = tokio::time::timeout(
            self.config.response_deadline(),
            self.client.get(url.clone()).send(),
        )
        .await;
        let response = match sent {
            Ok(response) => response.map_err(|e| self.transport_error(&url, e))?,
            Err(_) => return Err(self.read_timeout_error(&url)),
        };

        let status = response.status();
        let resolved = response.url().clone();
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), resolved.as_str()));
        }

        let body = self.read_body(response, &resolved).await?;
        let page = decode_page(&resolved, &body)?;

        info!("Data from {resolved} has been obtained successfully.");
        Ok(page)
    }

    /// Collect the body, allowing at most `read_timeout` between chunks
    async fn read_body(&self, mut response: Response, url: &Url) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        loop {
            match tokio::time::timeout(self.config.read_timeout, response.chunk()).await {
                Ok(Ok(Some(chunk))) => body.extend_from_slice(&chunk),
                Ok(Ok(None)) => return Ok(body),
                Ok(Err(e)) => return Err(self.transport_error(url, e)),
                Err(_) => return Err(self.read_timeout_error(url)),
            }
        }
    }

    fn read_timeout_error(&self, url: &Url) -> Error {
        Error::Timeout {
            url: url.to_string(),
            timeout_ms: self.config.read_timeout.as_millis() as u64,
        }
    }

    fn transport_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                timeout_ms: self.config.timeout_for(err.is_connect()).as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse> {
        self.get_page(request).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode a page body. Anything that is not `{info: {pages}, results: [..]}`
/// is a malformed response.
pub(crate) fn decode_page(url: &Url, body: &[u8]) -> Result<PageResponse> {
    serde_json::from_slice(body).map_err(|e| Error::malformed(url.as_str(), e.to_string()))
}
