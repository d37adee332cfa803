//! Pagination types and traits

use crate::error::Result;
use crate::types::{PageRequest, PageResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can fetch a single page, one attempt at a time.
///
/// Implementations must be safe to call concurrently; the paginator issues
/// all page requests of a collection at once through the same source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page. Retrying is the caller's job.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse> {
        (**self).fetch_page(request).await
    }
}
