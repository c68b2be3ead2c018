//! Attempt summary functionality.
//!
//! Every finished transfer attempt is described by a [`Summary`]. Summaries
//! are handed to the `on_attempt` callback of the downloader as they happen.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::download::{Download, Status, Summary};
//! use reqwest::StatusCode;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let download = Download::new("https://example.com/file.zip", "/tmp/file.zip")?;
//! let summary = Summary::new(download, 1)
//!     .with_statuscode(StatusCode::OK)
//!     .with_size(1024)
//!     .with_status(Status::Success);
//!
//! match summary.status() {
//!     Status::Success => println!("{} bytes written", summary.size()),
//!     Status::Retrying(msg) => println!("attempt {} failed: {}", summary.attempt(), msg),
//!     Status::Fail(msg) => println!("giving up: {}", msg),
//! }
//! # Ok(())
//! # }
//! ```

use super::download::Download;
use reqwest::StatusCode;

/// Outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The file was fully written.
    Success,
    /// The attempt failed and another one has been scheduled.
    Retrying(String),
    /// The attempt failed and no attempts are left for this URL.
    Fail(String),
}

/// Represents the summary of a single [`Download`] attempt.
#[derive(Debug, Clone)]
pub struct Summary {
    download: Download,
    /// 1-based number of this attempt for the URL.
    attempt: u32,
    /// HTTP status code, if a response was received.
    statuscode: Option<StatusCode>,
    /// Bytes written to disk.
    size: u64,
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`] for the given attempt, marked successful.
    pub fn new(download: Download, attempt: u32) -> Self {
        Self {
            download,
            attempt,
            statuscode: None,
            size: 0,
            status: Status::Success,
        }
    }

    /// Attach a status.
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach the HTTP status code of the response.
    pub fn with_statuscode(self, statuscode: StatusCode) -> Self {
        Self {
            statuscode: Some(statuscode),
            ..self
        }
    }

    /// Attach the number of bytes written.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Mark the attempt as failed, with another attempt to come.
    pub fn retry(self, msg: impl std::fmt::Display) -> Self {
        self.with_status(Status::Retrying(msg.to_string()))
    }

    /// Mark the attempt as the last failed one.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        self.with_status(Status::Fail(msg.to_string()))
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Get the attempt number.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Get the HTTP status code, if any.
    pub fn statuscode(&self) -> Option<StatusCode> {
        self.statuscode
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }
}
