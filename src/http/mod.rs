//! HTTP client module
//!
//! Provides the shared HTTP client and the single-attempt page fetcher.
//!
//! # Features
//!
//! - **Connection Pooling**: One `reqwest::Client` shared by every page fetch
//! - **Per-Attempt Timeouts**: Connect and read timeouts restart on each try
//! - **Error Classification**: Transport failures and non-2xx statuses are
//!   transient, undecodable bodies are fatal

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
