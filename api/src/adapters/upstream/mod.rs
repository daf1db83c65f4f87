//! Upstream adapter
//!
//! HTTP client for the third-party feed behind `/external-data/`.

pub mod client;

pub use client::HttpFeedClient;
