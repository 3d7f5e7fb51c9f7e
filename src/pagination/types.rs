//! Pagination types and traits
//!
//! Defines the page request, the fetcher abstraction, and the per-page
//! termination rule used by the aggregator.

use crate::error::Result;
use crate::types::PageSize;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Parameters for fetching a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Identifier of the parent resource
    pub identifier: String,
    /// Page number, starting at 1
    pub page: u32,
    /// Number of items requested
    pub page_size: PageSize,
}

impl PageRequest {
    /// Create a new page request
    pub fn new(identifier: impl Into<String>, page: u32, page_size: PageSize) -> Self {
        Self {
            identifier: identifier.into(),
            page,
            page_size,
        }
    }
}

/// Decision taken after a page has been received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// The page was full, request the next one
    Continue,
    /// The page was short, the collection is complete
    Done,
}

impl NextPage {
    /// Decide from the number of items a page returned.
    ///
    /// Only a strictly shorter page ends pagination. A full page, or an
    /// oversized one from a misbehaving server, always continues.
    pub fn evaluate(records_count: usize, page_size: PageSize) -> Self {
        if records_count < page_size.as_usize() {
            Self::Done
        } else {
            Self::Continue
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Tracks pagination progress during one aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page number of the next request
    pub page: u32,
    /// Pages received so far
    pub pages_fetched: u32,
    /// Total items received so far
    pub total_fetched: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page(1)
    }
}

impl PaginationState {
    /// Create a new pagination state starting at page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            pages_fetched: 0,
            total_fetched: 0,
        }
    }

    /// Record a received page
    pub fn add_page(&mut self, records_count: usize) {
        self.pages_fetched = self.pages_fetched.saturating_add(1);
        self.total_fetched = self.total_fetched.saturating_add(records_count as u64);
    }

    /// Advance to the next page number, `None` on overflow
    pub fn next_page(&mut self) -> Option<u32> {
        self.page = self.page.checked_add(1)?;
        Some(self.page)
    }
}

/// Fetches one page of items for an identifier.
///
/// Implementations must return items in a stable order and treat an error
/// as terminal for that call.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type produced by this fetcher
    type Item: Send;

    /// Fetch a single page
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Self::Item>>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    type Item = F::Item;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Self::Item>> {
        (**self).fetch_page(request).await
    }
}

/// Adapts a closure into a [`PageFetcher`]
///
/// ```rust,ignore
/// let fetcher = FnFetcher::new(|request: PageRequest| {
///     Box::pin(async move { api.sale_artworks(&request.identifier, request.page).await })
/// });
/// ```
pub struct FnFetcher<F, T> {
    f: F,
    _item: PhantomData<fn() -> T>,
}

impl<F, T> FnFetcher<F, T>
where
    F: Fn(PageRequest) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync,
{
    /// Wrap a closure
    pub fn new(f: F) -> Self {
        Self {
            f,
            _item: PhantomData,
        }
    }
}

impl<F, T> fmt::Debug for FnFetcher<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, T> PageFetcher for FnFetcher<F, T>
where
    F: Fn(PageRequest) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync,
    T: Send + 'static,
{
    type Item = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<T>> {
        (self.f)(request.clone()).await
    }
}
