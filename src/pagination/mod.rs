//! Pagination module
//!
//! Page-count discovery followed by a concurrent fan-out over the
//! remaining pages.
//!
//! # Overview
//!
//! The API also links each page to the next one, but following those links
//! serializes every round trip. Instead the first page is fetched on its own
//! to learn `info.pages`, then every other page is requested at once and the
//! results are stitched back together in page order.

mod orchestrator;
mod types;

pub use orchestrator::Paginator;
pub use types::PageSource;

#[cfg(test)]
mod tests;
