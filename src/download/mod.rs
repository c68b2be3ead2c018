//! Download module containing the values a batch is made of.
//!
//! # Overview
//!
//! - [`download`] - a URL bound to its destination path
//! - [`summary`] - outcome of a single transfer attempt
//! - [`report`] - final partition of a batch into downloaded and failed URLs
//!
//! Batch bookkeeping (pending attempts, failure counts) lives in a private
//! `state` module driven by the [`Downloader`](crate::Downloader).
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::download::{Download, Report};
//! use std::path::Path;
//!
//! let download = Download::into_directory("https://example.com/file.zip", Path::new("out"))?;
//! assert_eq!(download.path, Path::new("out/file.zip"));
//!
//! let report = Report::default();
//! assert!(report.is_complete());
//! # Ok::<(), lanefetch::Error>(())
//! ```

pub mod download;
pub mod report;
pub(crate) mod state;
pub mod summary;

pub use download::Download;
pub use report::Report;
pub use summary::{Status, Summary};
