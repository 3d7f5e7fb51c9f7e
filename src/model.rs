//! Network model for one paginated collection
//!
//! Pairs an identifier with the items most recently fetched for it. Every
//! [`PagedCollection::fetch`] goes back to the fetcher; the stored items are
//! only what the last successful fetch returned.

use crate::error::Result;
use crate::pagination::{PageAggregator, PageFetcher};

/// The items of one parent resource, as last fetched
pub struct PagedCollection<F: PageFetcher> {
    identifier: String,
    aggregator: PageAggregator<F>,
    items: Option<Vec<F::Item>>,
}

impl<F: PageFetcher> PagedCollection<F> {
    /// Create a collection that has not been fetched yet
    pub fn new(identifier: impl Into<String>, aggregator: PageAggregator<F>) -> Self {
        Self {
            identifier: identifier.into(),
            aggregator,
            items: None,
        }
    }

    /// Identifier of the parent resource
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Items from the last successful fetch, `None` before the first one
    pub fn items(&self) -> Option<&[F::Item]> {
        self.items.as_deref()
    }

    /// Fetch every page and store the result.
    ///
    /// On failure the previously stored items are kept and the error is
    /// returned.
    pub async fn fetch(&mut self) -> Result<&[F::Item]> {
        let items = self.aggregator.fetch_all(&self.identifier).await?;
        Ok(self.items.insert(items).as_slice())
    }

    /// Take the stored items, leaving the collection unfetched
    pub fn take_items(&mut self) -> Option<Vec<F::Item>> {
        self.items.take()
    }
}

impl<F> std::fmt::Debug for PagedCollection<F>
where
    F: PageFetcher + std::fmt::Debug,
    F::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollection")
            .field("identifier", &self.identifier)
            .field("aggregator", &self.aggregator)
            .field("items", &self.items)
            .finish()
    }
}
