//! Harvest configuration
//!
//! Settings can come from a YAML file; every field is optional and falls
//! back to the defaults below. Command-line flags are applied on top.
//!
//! ```yaml
//! base_url: https://rickandmortyapi.com/api/
//! http:
//!   connect_timeout_ms: 5000
//!   read_timeout_ms: 2000
//!   max_retries: 5
//!   retry_delay_ms: 2000
//! output:
//!   dir: ./data
//! episodes:
//!   from_year: 2017
//!   to_year: 2021
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use crate::output::YearRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete harvest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// API base URL
    pub base_url: String,

    /// HTTP and retry settings
    pub http: HttpSettings,

    /// Where collection files are written
    pub output: OutputSettings,

    /// Air-date window for the episode listing
    pub episodes: EpisodeSettings,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpSettings::default(),
            output: OutputSettings::default(),
            episodes: EpisodeSettings::default(),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// HTTP and retry settings, durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            read_timeout_ms: 2_000,
            max_retries: 5,
            retry_delay_ms: 2_000,
            user_agent: None,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Episode listing window, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeSettings {
    pub from_year: i32,
    pub to_year: i32,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        let range = YearRange::default();
        Self {
            from_year: range.from(),
            to_year: range.to(),
        }
    }
}

// ============================================================================
// Loading and Validation
// ============================================================================

impl HarvestConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::from_yaml_str(&text)
    }

    /// Reject values the fetch engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        if self.http.max_retries == 0 {
            return Err(Error::invalid_value("http.max_retries", "must be at least 1"));
        }
        if self.http.connect_timeout_ms == 0 {
            return Err(Error::invalid_value(
                "http.connect_timeout_ms",
                "must be positive",
            ));
        }
        if self.http.read_timeout_ms == 0 {
            return Err(Error::invalid_value("http.read_timeout_ms", "must be positive"));
        }
        self.year_range()?;
        Ok(())
    }

    /// Episode window as a validated range
    pub fn year_range(&self) -> Result<YearRange> {
        YearRange::new(self.episodes.from_year, self.episodes.to_year)
    }

    /// HTTP client config described by this harvest config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .connect_timeout(Duration::from_millis(self.http.connect_timeout_ms))
            .read_timeout(Duration::from_millis(self.http.read_timeout_ms))
            .max_retries(self.http.max_retries)
            .retry_delay(Duration::from_millis(self.http.retry_delay_ms));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}
