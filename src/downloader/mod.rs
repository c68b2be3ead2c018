//! Downloader module containing core downloader functionality, builder pattern, and configuration.
//!
//! - `downloader` - Core Downloader struct running batches over a lane pool
//! - `builder` - DownloaderBuilder for flexible configuration using the builder pattern
//! - `config` - Configuration structure, defaults and callback type
//!
//! # Examples
//!
//! ```rust,no_run
//! use lanefetch::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), lanefetch::Error> {
//! let downloader = DownloaderBuilder::hidden()
//!     .paths(["/tmp/a.bin", "/tmp/b.bin"])
//!     .attempts(3)
//!     .build();
//!
//! let report = downloader
//!     .download(&["https://example.com/1", "https://example.com/2"])
//!     .await?;
//! assert_eq!(report.downloaded.len() + report.failed.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{AttemptCallback, DownloaderConfig};
pub use downloader::Downloader;
