//! # page-aggregator
//!
//! Fetch every page of a paginated API resource into one ordered collection.
//!
//! Pages are requested one at a time, starting at page 1, until a page comes
//! back with fewer items than were asked for. The first failed page aborts
//! the whole operation and nothing fetched before it is returned.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use page_aggregator::{Config, HttpPageFetcher, PageAggregator, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_file("artsy.yaml")?;
//!     let fetcher = HttpPageFetcher::from_config(&config)?;
//!     let aggregator = PageAggregator::new(fetcher).with_page_size(config.page_size);
//!
//!     let sale_artworks = aggregator.fetch_all("los-angeles-modern-auctions-march-2015").await?;
//!     println!("{} sale artworks", sale_artworks.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  PageAggregator::fetch_all(identifier)        │
//! │  page 1, 2, 3, ... until len(page) < size     │
//! └───────────────────────┬───────────────────────┘
//!                         │ PageFetcher::fetch_page
//!          ┌──────────────┴──────────────┐
//!          │ HttpPageFetcher │ FnFetcher │
//!          └─────────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page fetching and aggregation
pub mod pagination;

/// HTTP client and page fetcher
pub mod http;

/// Collection model holding the last fetched items
pub mod model;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Config;
pub use error::{Error, Result};
pub use http::HttpPageFetcher;
pub use model::PagedCollection;
pub use pagination::{FnFetcher, PageAggregator, PageFetcher, PageRequest};
pub use types::PageSize;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
