//! Core downloader implementation with the attempt and retry logic.
//!
//! A batch works on three shared pieces:
//!
//! - a [`Pool`] with `threads` lanes, onto which every attempt is submitted
//!   with a weight of 1;
//! - the batch state, holding the pending attempts, the downloaded URLs and
//!   the failure count of every URL;
//! - the HTTP client and progress display.
//!
//! An attempt streams the response body into its destination file. When it
//! fails, the partial file is removed and, as long as the URL has attempts
//! left, a fresh attempt is submitted to the pool, which may put it on any
//! lane. The caller polls the pending set until it is empty.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lanefetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), lanefetch::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("/tmp/out"))
//!     .attempts(2)
//!     .threads(2)
//!     .build();
//!
//! let report = downloader
//!     .download(&["http://a.example/x.bin", "http://b.example/y.bin"])
//!     .await?;
//!
//! for (url, path) in &report.downloaded {
//!     println!("{} -> {}", url, path.display());
//! }
//! for url in &report.failed {
//!     println!("{} could not be downloaded", url);
//! }
//! # Ok(())
//! # }
//! ```

use super::config::{AttemptCallback, DownloaderConfig};
use crate::download::state::{DownloadState, Verdict};
use crate::download::{Download, Report, Summary};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::pool::{panic_message, Pool};
use crate::progress::display::ProgressDisplay;

use futures::stream::StreamExt;
use reqwest::{header::HeaderMap, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::future::Future;
use std::io::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::{debug, error, trace};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use lanefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().directory("downloads".into()).build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> Option<&PathBuf> {
        self.config.directory.as_ref()
    }

    /// Gets the explicit destination paths.
    pub fn paths(&self) -> Option<&[PathBuf]> {
        self.config.paths.as_deref()
    }

    /// Gets the maximum number of attempts per URL.
    pub fn attempts(&self) -> u32 {
        self.config.attempts
    }

    /// Gets the number of lanes.
    pub fn threads(&self) -> usize {
        self.config.threads
    }

    /// Gets the completion polling interval.
    pub fn polling(&self) -> Duration {
        self.config.polling
    }

    /// Gets the socket inactivity timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    /// Gets the transient-error retries of a single request.
    pub fn transport_retries(&self) -> u32 {
        self.config.transport_retries
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Downloads every URL and returns which ones made it.
    ///
    /// Bad options (no destination, wrong number of paths, unparsable URLs,
    /// zero attempts or threads) are reported as an error before any request
    /// is sent. Failed transfers never make this call fail: URLs that used up
    /// their attempts are listed in [`Report::failed`].
    pub async fn download<S: AsRef<str>>(&self, urls: &[S]) -> Result<Report> {
        self.config.validate()?;
        let downloads = self.resolve(urls)?;

        let client = create_http_client(HttpClientConfig {
            retries: self.config.transport_retries,
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
            connect_timeout: self.config.timeout,
        })?;

        let batch = Arc::new(Batch {
            client,
            pool: Pool::new(self.config.threads)?,
            state: Mutex::new(DownloadState::new(&downloads)),
            attempts: self.config.attempts,
            timeout: self.config.timeout,
            progress: ProgressDisplay::new(self.config.style_options.clone(), downloads.len()),
            on_attempt: self.config.on_attempt.clone(),
        });

        debug!(
            "Downloading {} files with {} lanes and {} attempts",
            downloads.len(),
            self.config.threads,
            self.config.attempts
        );
        for download in &downloads {
            Batch::schedule(&batch, download.clone(), 1);
        }

        while !batch.lock_state().is_settled() {
            tokio::time::sleep(self.config.polling).await;
        }
        batch.progress.finish();

        let state = std::mem::take(&mut *batch.lock_state());
        let report = state.into_report(&downloads, self.config.attempts);
        debug!(
            "Batch done: {} downloaded, {} failed",
            report.downloaded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Binds every URL to its destination path.
    fn resolve<S: AsRef<str>>(&self, urls: &[S]) -> Result<Vec<Download>> {
        match (&self.config.paths, &self.config.directory) {
            (Some(paths), _) => {
                if paths.len() != urls.len() {
                    return Err(Error::PathCountMismatch {
                        expected: urls.len(),
                        actual: paths.len(),
                    });
                }
                urls.iter()
                    .zip(paths)
                    .map(|(url, path)| Download::new(url.as_ref(), path.clone()))
                    .collect()
            }
            (None, Some(directory)) => urls
                .iter()
                .map(|url| Download::into_directory(url.as_ref(), directory))
                .collect(),
            (None, None) => Err(Error::MissingDestination),
        }
    }
}

/// Everything the attempts of one batch share.
struct Batch {
    client: ClientWithMiddleware,
    pool: Pool,
    state: Mutex<DownloadState>,
    attempts: u32,
    timeout: Option<Duration>,
    progress: ProgressDisplay,
    on_attempt: Option<Arc<AttemptCallback>>,
}

impl Batch {
    /// Submits attempt number `attempt` of a download to the pool.
    fn schedule(batch: &Arc<Batch>, download: Download, attempt: u32) {
        let batch_ref = Arc::clone(batch);
        batch.pool.submit(move || async move {
            batch_ref.attempt(download, attempt).await;
            Ok::<(), Error>(())
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, DownloadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one attempt and records its outcome.
    async fn attempt(self: Arc<Self>, download: Download, attempt: u32) {
        trace!(
            "Downloading '{}' to '{}' (attempt {}) ...",
            download.source,
            download.path.display(),
            attempt
        );

        let e = match self.fetch(&download).await {
            Ok(size) => {
                trace!("Downloaded '{}' to '{}'", download.source, download.path.display());
                let summary = Summary::new(download.clone(), attempt)
                    .with_statuscode(StatusCode::OK)
                    .with_size(size);

                // Bookkeeping comes first; the callback runs under the lock so
                // the batch cannot be reported as settled before it returns.
                let mut state = self.lock_state();
                state.succeed(&download.source, download.path);
                self.progress.settle_url();
                self.notify(&summary);
                return;
            }
            Err(e) => e,
        };

        trace!(
            "Failed to download '{}' to '{}': {}",
            download.source,
            download.path.display(),
            e
        );
        discard(&download.path).await;

        let mut summary = Summary::new(download.clone(), attempt);
        if let Error::Status(code) = e {
            summary = summary.with_statuscode(code);
        }

        let mut state = self.lock_state();
        match state.fail(&download.source, self.attempts) {
            Verdict::Retry(_) => {
                trace!("Retry to download '{}' to '{}'", download.source, download.path.display());
                Self::schedule(&self, download, attempt + 1);
                self.notify(&summary.retry(&e));
            }
            Verdict::Exhausted(failures) => {
                debug!("Giving up on '{}' after {} failed attempts", download.source, failures);
                self.progress.settle_url();
                self.notify(&summary.fail(&e));
            }
        }
    }

    /// Streams the body of the URL into the destination file.
    ///
    /// Returns the number of bytes written. Anything but `200 OK` is a failure.
    async fn fetch(&self, download: &Download) -> Result<u64> {
        if let Some(output_dir) = download.path.parent() {
            if !output_dir.as_os_str().is_empty() {
                fs::create_dir_all(output_dir).await?;
            }
        }
        debug!("Creating destination file {:?}", &download.path);
        let mut file = File::create(&download.path).await?;

        debug!("Fetching {}", &download.url);
        let res = self
            .within(self.client.get(download.url.clone()).send())
            .await??;
        if res.status() != StatusCode::OK {
            return Err(Error::Status(res.status()));
        }

        let pb = self
            .progress
            .transfer_bar(res.content_length().unwrap_or(0), &label(download));
        let mut size: u64 = 0;
        let mut stream = res.bytes_stream();

        let streamed: Result<()> = async {
            while let Some(item) = self.within(stream.next()).await? {
                let mut chunk = item?;
                let chunk_size = chunk.len() as u64;
                size += chunk_size;
                pb.inc(chunk_size);
                file.write_all_buf(&mut chunk).await?;
            }
            file.flush().await?;
            Ok(())
        }
        .await;

        self.progress.finish_transfer(pb);
        streamed.map(|()| size)
    }

    /// Awaits `fut`, giving up once the socket timeout elapses.
    async fn within<F: Future>(&self, fut: F) -> Result<F::Output> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| Error::Timeout(limit)),
            None => Ok(fut.await),
        }
    }

    /// Hands the summary to the `on_attempt` callback.
    ///
    /// A panicking callback is logged and otherwise ignored: the attempt's
    /// bookkeeping is already done at this point.
    fn notify(&self, summary: &Summary) {
        if let Some(ref callback) = self.on_attempt {
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| callback(summary))) {
                error!(
                    "Callback panicked on '{}': {}",
                    summary.download().source,
                    panic_message(panic.as_ref())
                );
            }
        }
    }
}

/// Name shown next to the transfer bar of an attempt.
fn label(download: &Download) -> String {
    match download.path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => download.source.clone(),
    }
}

/// Removes what a failed attempt left behind.
async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial file {:?}", path),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => error!("Failed to remove partial file {:?}: {}", path, e),
    }
}
