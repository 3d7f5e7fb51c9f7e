//! Pagination module
//!
//! Page-number pagination where a page shorter than the requested size marks
//! the end of the collection.
//!
//! # Overview
//!
//! A [`PageFetcher`] knows how to get one page. The [`PageAggregator`] calls
//! it for pages 1, 2, 3, ... and concatenates the results in order until a
//! short page arrives or a fetch fails.

mod aggregator;
mod types;

pub use aggregator::PageAggregator;
pub use types::{FnFetcher, NextPage, PageFetcher, PageRequest, PaginationState};
