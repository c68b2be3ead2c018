//! HTTP module containing HTTP client functionality.
//!
//! The client is a `reqwest` client wrapped in `reqwest-middleware`, with
//! request tracing always on and transient-error retries on demand. Those
//! retries happen inside a single download attempt; attempt-level retries
//! are handled by the [`Downloader`](crate::Downloader).
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
