//! Collection client module
//!
//! Binds the paginator to the three collections of the API.
//!
//! # Collections
//!
//! - `character` - every character
//! - `location` - every location
//! - `episode` - every episode

mod client;

pub use client::{collection_endpoint, parse_base_url, CollectionClient, CollectionResults};
