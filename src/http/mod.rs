//! HTTP module
//!
//! Provides the HTTP client and a [`PageFetcher`](crate::pagination::PageFetcher)
//! that reads one page of JSON items per request.
//!
//! # Features
//!
//! - **Base URL joining**: paths are resolved against a configured base URL
//! - **Default headers**: e.g. API tokens sent with every request
//! - **Status classification**: 4xx/5xx responses become `Error::HttpStatus`

mod client;
mod fetcher;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use fetcher::{extract_records, HttpPageFetcher};

#[cfg(test)]
mod tests;
