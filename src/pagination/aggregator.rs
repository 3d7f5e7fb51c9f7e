//! Sequential page aggregation
//!
//! Drives a [`PageFetcher`] page by page until a short page is returned,
//! concatenating everything into one ordered collection.

use super::types::{NextPage, PageFetcher, PageRequest, PaginationState};
use crate::error::{Error, Result};
use crate::types::PageSize;
use tracing::{debug, info, warn};

/// Collects every page of a resource into a single `Vec`
#[derive(Debug, Clone)]
pub struct PageAggregator<F> {
    fetcher: F,
    page_size: PageSize,
}

impl<F: PageFetcher> PageAggregator<F> {
    /// Create an aggregator with the default page size
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            page_size: PageSize::default(),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Get the page size
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch all items for `identifier`.
    ///
    /// Pages are requested one at a time starting at page 1. The first error
    /// is returned unchanged and anything accumulated before it is dropped.
    /// Dropping the returned future stops pagination before the next request.
    pub async fn fetch_all(&self, identifier: &str) -> Result<Vec<F::Item>> {
        let mut accumulated = Vec::new();
        let mut state = PaginationState::new();

        loop {
            let request = PageRequest::new(identifier, state.page, self.page_size);

            let items = match self.fetcher.fetch_page(&request).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(
                        "Fetching page {} for '{}' failed: {}",
                        state.page, identifier, e
                    );
                    return Err(e);
                }
            };

            let count = items.len();
            state.add_page(count);
            accumulated.extend(items);
            debug!(
                "Fetched page {} for '{}': {} items",
                state.page, identifier, count
            );

            if NextPage::evaluate(count, self.page_size).is_done() {
                info!(
                    "Fetched {} items for '{}' in {} pages",
                    state.total_fetched, identifier, state.pages_fetched
                );
                return Ok(accumulated);
            }

            let last_page = state.page;
            state.next_page().ok_or_else(|| Error::PageOverflow {
                identifier: identifier.to_string(),
                last_page,
            })?;
        }
    }
}
