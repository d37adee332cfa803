//! Concurrent page orchestration

use super::types::PageSource;
use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::types::{PageRequest, PageResponse, Record};
use futures::future::try_join_all;
use tracing::{debug, info};
use url::Url;

/// Fetches every page of a collection endpoint
#[derive(Debug)]
pub struct Paginator<S> {
    source: S,
    retry: RetryPolicy,
}

impl<S: PageSource> Paginator<S> {
    /// Create a paginator over a page source
    pub fn new(source: S, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    /// Give back the page source
    pub fn into_source(self) -> S {
        self.source
    }

    /// Fetch one page under the retry policy
    pub async fn fetch_page_with_retry(&self, endpoint: &Url, page: u32) -> Result<PageResponse> {
        let request = PageRequest::new(endpoint.clone(), page);
        self.retry
            .attempt(&request, || self.source.fetch_page(&request))
            .await
    }

    /// Fetch every page of `endpoint` and concatenate the results in page
    /// order.
    ///
    /// Page 1 is fetched first and its `info.pages` is taken as the page
    /// count for the whole call. Pages `2..=pages` are then requested
    /// concurrently; page 1's results are reused rather than requested again.
    /// The first page that fails for good fails the whole call and the
    /// remaining in-flight requests are dropped.
    pub async fn fetch_all_pages(&self, endpoint: &Url) -> Result<Vec<Record>> {
        let first = self
            .fetch_page_with_retry(endpoint, PageRequest::FIRST_PAGE)
            .await?;
        let total_pages = first.total_pages();
        debug!("{endpoint} has {total_pages} page(s)");

        let mut records = first.results;
        if total_pages == 1 {
            return Ok(records);
        }

        let remaining = (PageRequest::FIRST_PAGE + 1..=total_pages)
            .map(|page| self.fetch_page_with_retry(endpoint, page));
        let pages = try_join_all(remaining).await?;

        records.reserve(pages.iter().map(|p| p.results.len()).sum());
        for page in pages {
            records.extend(page.results);
        }

        info!(
            "Fetched {} records across {total_pages} pages from {endpoint}",
            records.len()
        );
        Ok(records)
    }
}
