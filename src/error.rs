//! Error types for rickmorty-harvest
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;
use url::Url;

/// The main error type for rickmorty-harvest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transient HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    // ============================================================================
    // Fatal Response Errors
    // ============================================================================
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    // ============================================================================
    // Page Failures
    // ============================================================================
    #[error("Page {page} of {endpoint} failed after {attempts} attempts: {source}")]
    RequestExhausted {
        endpoint: String,
        page: u32,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Page {page} of {endpoint} failed: {source}")]
    PageFailed {
        endpoint: String,
        page: u32,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write '{path}': {message}")]
    Output { path: String, message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a final error with the endpoint and page it belongs to.
    ///
    /// Errors that already carry page context are returned unchanged.
    pub fn for_page(self, endpoint: &Url, page: u32) -> Self {
        match self {
            Self::RequestExhausted { .. } | Self::PageFailed { .. } => self,
            other => Self::PageFailed {
                endpoint: endpoint.to_string(),
                page,
                source: Box::new(other),
            },
        }
    }

    /// Check if this error is worth another attempt.
    ///
    /// Every transport failure and every non-2xx status is transient.
    /// Response bodies that fail to parse are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// Endpoint and page a failure is attributed to, if any
    pub fn failed_page(&self) -> Option<(&str, u32)> {
        match self {
            Error::RequestExhausted { endpoint, page, .. }
            | Error::PageFailed { endpoint, page, .. } => Some((endpoint.as_str(), *page)),
            _ => None,
        }
    }
}

/// Result type alias for rickmorty-harvest
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
