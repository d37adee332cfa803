//! Output module
//!
//! Everything that happens to a collection after it has been fetched.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Tagging records with a synthetic identifier
//! - Writing collections to indented JSON files
//! - Listing episodes whose air date falls in a year range

mod filter;
mod records;
mod writer;

pub use filter::{episodes_aired_between, parse_air_date, render_episode_listing, YearRange};
pub use records::{prepare_records, StoredRecord};
pub use writer::{save_collection, to_json_string, write_json};
