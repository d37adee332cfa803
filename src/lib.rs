//! # rickmorty-harvest
//!
//! Downloads every character, location and episode from the
//! [Rick and Morty API](https://rickandmortyapi.com) and stores each
//! collection as a JSON document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rickmorty_harvest::{CollectionClient, HttpClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CollectionClient::new(HttpClientConfig::default())?;
//!     let episodes = client.fetch_all_episodes().await?;
//!     println!("{} episodes", episodes.len());
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ CollectionClient   characters / locations / episodes     │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴─────────────────────────────┐
//! │ Paginator   page 1 → info.pages → pages 2..N at once     │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ per page
//! ┌──────────────┬─────────────┴────────────────────────────┐
//! │ RetryPolicy  │ HttpClient (PageSource)                  │
//! │ fixed delay  │ GET ?page=N, per-attempt timeouts        │
//! └──────────────┴──────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Page, record and collection types
pub mod types;

/// Fixed-delay retry policy
pub mod retry;

/// HTTP client and single-page fetcher
pub mod http;

/// Concurrent page orchestration
pub mod pagination;

/// Per-collection client
pub mod collections;

/// Record tagging, JSON files and episode filtering
pub mod output;

/// YAML configuration
pub mod config;

/// Log output setup
pub mod logging;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use collections::{CollectionClient, CollectionResults};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{PageSource, Paginator};
pub use retry::RetryPolicy;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
