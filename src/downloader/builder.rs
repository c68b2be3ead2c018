//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .attempts(3)
//!     .threads(4)
//!     .polling(Duration::from_millis(50))
//!     .build();
//! ```

use super::{
    config::{AttemptCallback, DownloaderConfig},
    downloader::Downloader,
};
use crate::download::Summary;
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use lanefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().attempts(5).directory("downloads".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the downloads.
    ///
    /// Each file is named after the last segment of its URL path.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = Some(directory);
        self
    }

    /// Sets the destination of every URL, in the same order as the URLs.
    ///
    /// Takes precedence over [`directory()`](DownloaderBuilder::directory).
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Set the maximum number of attempts per URL.
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.config.attempts = attempts;
        self
    }

    /// Set the number of lanes transferring files at the same time.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set the interval between two completion checks.
    pub fn polling(mut self, polling: Duration) -> Self {
        self.config.polling = polling;
        self
    }

    /// Set the socket inactivity timeout of a transfer.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Let transfers wait on the socket forever.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the transient-error retries of a single HTTP request.
    ///
    /// These happen inside one attempt and do not count against
    /// [`attempts()`](DownloaderBuilder::attempts).
    pub fn transport_retries(mut self, retries: u32) -> Self {
        self.config.transport_retries = retries;
        self
    }

    /// Route every request through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for every finished attempt.
    ///
    /// The callback runs as soon as an attempt is over, before the batch
    /// moves on with that URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanefetch::downloader::DownloaderBuilder;
    /// use lanefetch::download::Status;
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .on_attempt(|summary| {
    ///         match summary.status() {
    ///             Status::Success => println!("[Success] {}", summary.download().source),
    ///             Status::Retrying(e) => println!("[Retry] {} - {}", summary.download().source, e),
    ///             Status::Fail(e) => println!("[Failed] {} - {}", summary.download().source, e),
    ///         }
    ///     })
    ///     .build();
    /// ```
    pub fn on_attempt<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        let callback: AttemptCallback = Box::new(callback);
        self.config.on_attempt = Some(Arc::new(callback));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    ///
    /// See also [`header()`].
    ///
    /// [`header()`]: DownloaderBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use lanefetch::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_static("lanefetch/0.1");
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
