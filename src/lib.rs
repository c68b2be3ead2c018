//! lanefetch downloads batches of files over HTTP(S) with bounded
//! parallelism and per-URL retries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use lanefetch::{DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .attempts(3)
//!     .threads(4)
//!     .build();
//! let report = downloader
//!     .download(&["https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip"])
//!     .await?;
//! println!("downloaded: {:?}, failed: {:?}", report.downloaded, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`pool`] - A fixed set of serial lanes with least-loaded task assignment
//! - [`download`] - Download targets, attempt summaries and batch reports
//! - [`downloader`] - The `Downloader` and `DownloaderBuilder` running batches on a pool
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality
//! - [`progress`] - Progress bar styling and display management
//! - [`logging`] - Opt-in log subscriber

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod logging;
pub mod pool;
pub mod progress;

pub use download::{Download, Report, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use pool::Pool;
pub use progress::StyleOptions;
