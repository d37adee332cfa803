//! Common types used throughout rickmorty-harvest
//!
//! This module contains the page and record types shared by the
//! HTTP layer, the pagination orchestrator and the output helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One raw item from a page's `results`. The engine never inspects it.
pub type Record = JsonObject;

// ============================================================================
// Page Types
// ============================================================================

/// A request for one page of one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    endpoint: Url,
    page: u32,
}

impl PageRequest {
    /// First page number served by the API
    pub const FIRST_PAGE: u32 = 1;

    /// Create a page request. Page numbers are 1-based; 0 is clamped to 1.
    pub fn new(endpoint: Url, page: u32) -> Self {
        Self {
            endpoint,
            page: page.max(Self::FIRST_PAGE),
        }
    }

    /// Collection endpoint, without the page query
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Full URL including the `page` query parameter
    pub fn url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        url
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (page {})", self.endpoint, self.page)
    }
}

/// Pagination metadata returned with every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of pages in the collection
    pub pages: u32,
    /// Total number of records in the collection
    #[serde(default)]
    pub count: Option<u64>,
    /// Link to the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page
    #[serde(default)]
    pub prev: Option<String>,
}

/// One decoded page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub info: PageInfo,
    pub results: Vec<Record>,
}

impl PageResponse {
    /// Build a page from its parts
    pub fn new(pages: u32, results: Vec<Record>) -> Self {
        Self {
            info: PageInfo {
                pages,
                count: None,
                next: None,
                prev: None,
            },
            results,
        }
    }

    /// Total page count, never less than one
    pub fn total_pages(&self) -> u32 {
        self.info.pages.max(1)
    }
}

// ============================================================================
// Collections
// ============================================================================

/// The three collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Characters,
    Locations,
    Episodes,
}

impl Collection {
    /// Path segment under the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Collection::Characters => "character",
            Collection::Locations => "location",
            Collection::Episodes => "episode",
        }
    }

    /// Default output file name
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Characters => "characters.json",
            Collection::Locations => "locations.json",
            Collection::Episodes => "episodes.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Characters => "characters",
            Collection::Locations => "locations",
            Collection::Episodes => "episodes",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_request_url() {
        let endpoint = Url::parse("https://rickandmortyapi.com/api/character").unwrap();
        let request = PageRequest::new(endpoint, 3);
        assert_eq!(
            request.url().as_str(),
            "https://rickandmortyapi.com/api/character?page=3"
        );
        assert_eq!(request.page(), 3);
    }

    #[test]
    fn test_page_request_clamps_zero() {
        let endpoint = Url::parse("http://localhost/episode").unwrap();
        assert_eq!(PageRequest::new(endpoint, 0).page(), 1);
    }

    #[test]
    fn test_page_response_deserialize() {
        let page: PageResponse = serde_json::from_value(json!({
            "info": {"count": 826, "pages": 42, "next": "https://x/?page=2", "prev": null},
            "results": [{"id": 1, "name": "Rick Sanchez"}]
        }))
        .unwrap();

        assert_eq!(page.total_pages(), 42);
        assert_eq!(page.info.count, Some(826));
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0]["name"], "Rick Sanchez");
    }

    #[test]
    fn test_page_response_requires_results() {
        let err = serde_json::from_value::<PageResponse>(json!({"info": {"pages": 1}}));
        assert!(err.is_err());
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(Collection::Characters.path(), "character");
        assert_eq!(Collection::Locations.path(), "location");
        assert_eq!(Collection::Episodes.path(), "episode");
        assert_eq!(Collection::Episodes.file_name(), "episodes.json");
        assert_eq!(Collection::Locations.to_string(), "locations");
    }
}
