//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::downloader::{AttemptCallback, DownloaderConfig};
//! use lanefetch::download::{Status, Summary};
//!
//! let config = DownloaderConfig::default();
//! assert_eq!(config.attempts, 1);
//! assert_eq!(config.threads, 1);
//!
//! let callback: AttemptCallback = Box::new(|summary: &Summary| {
//!     if let Status::Fail(msg) = summary.status() {
//!         eprintln!("{} failed: {}", summary.download().source, msg);
//!     }
//! });
//! ```

use crate::download::Summary;
use crate::error::{Error, Result};
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback invoked with the summary of every finished attempt.
pub type AttemptCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader.
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory receiving the files, named after their URL.
    pub directory: Option<PathBuf>,
    /// Explicit destination of every URL, in URL order. Takes precedence over `directory`.
    pub paths: Option<Vec<PathBuf>>,
    /// Maximum number of attempts per URL.
    pub attempts: u32,
    /// Number of lanes, i.e. of transfers running at the same time.
    pub threads: usize,
    /// Interval between two checks for batch completion.
    pub polling: Duration,
    /// Socket inactivity timeout of a transfer. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Transient-error retries of a single HTTP request, inside one attempt.
    pub transport_retries: u32,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Callback for every finished attempt.
    pub on_attempt: Option<Arc<AttemptCallback>>,
}

impl DownloaderConfig {
    pub const DEFAULT_ATTEMPTS: u32 = 1;
    pub const DEFAULT_THREADS: usize = 1;
    pub const DEFAULT_POLLING: Duration = Duration::from_millis(100);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Checks the numeric options.
    ///
    /// Destinations are checked against the URL list when a batch starts.
    pub fn validate(&self) -> Result<()> {
        if self.attempts < 1 {
            return Err(Error::InvalidArgument(
                "'attempts' should be at least 1".into(),
            ));
        }
        if self.threads < 1 {
            return Err(Error::InvalidArgument("'threads' should be at least 1".into()));
        }
        if self.polling.is_zero() {
            return Err(Error::InvalidArgument(
                "'polling' should be at least 1ms".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("paths", &self.paths)
            .field("attempts", &self.attempts)
            .field("threads", &self.threads)
            .field("polling", &self.polling)
            .field("timeout", &self.timeout)
            .field("transport_retries", &self.transport_retries)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("style_options", &self.style_options)
            .field("on_attempt", &self.on_attempt.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: None,
            paths: None,
            attempts: Self::DEFAULT_ATTEMPTS,
            threads: Self::DEFAULT_THREADS,
            polling: Self::DEFAULT_POLLING,
            timeout: Some(Self::DEFAULT_TIMEOUT),
            transport_retries: 0,
            headers: None,
            proxy: None,
            style_options: StyleOptions::default(),
            on_attempt: None,
        }
    }
}
