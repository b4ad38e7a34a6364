//! HTTP client module
//!
//! Provides the authenticated JSON client used by the page fetcher.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
