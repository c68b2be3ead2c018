//! Bookkeeping of one batch while its attempts are in flight.

use super::download::Download;
use super::report::Report;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// What happens to a URL after one of its attempts failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// Another attempt is due; holds the number of failures so far.
    Retry(u32),
    /// No attempts left; holds the number of failures.
    Exhausted(u32),
}

/// Mutable state shared by the attempts of a batch.
///
/// `pending` is a multiset holding one entry per attempt that is queued or
/// running. A failed attempt removes its own entry before adding the entry of
/// its retry, so a single attempt is never counted twice.
#[derive(Debug, Default)]
pub(crate) struct DownloadState {
    pending: Vec<String>,
    downloaded: HashMap<String, PathBuf>,
    failures: HashMap<String, u32>,
}

impl DownloadState {
    /// Creates the state with one pending entry per download.
    pub(crate) fn new(downloads: &[Download]) -> Self {
        Self {
            pending: downloads.iter().map(|d| d.source.clone()).collect(),
            ..Self::default()
        }
    }

    /// Returns `true` once no attempt is queued or running.
    pub(crate) fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Records a successful attempt.
    pub(crate) fn succeed(&mut self, url: &str, path: PathBuf) {
        self.remove_pending(url);
        self.downloaded.insert(url.to_string(), path);
    }

    /// Records a failed attempt and decides whether to try again.
    ///
    /// When a retry is due the URL is put back into the pending set before
    /// this returns, so the batch never looks settled in between.
    pub(crate) fn fail(&mut self, url: &str, attempts: u32) -> Verdict {
        let failures = self.failures.entry(url.to_string()).or_insert(0);
        *failures += 1;
        let failures = *failures;

        self.remove_pending(url);
        if failures < attempts {
            self.pending.push(url.to_string());
            Verdict::Retry(failures)
        } else {
            Verdict::Exhausted(failures)
        }
    }

    /// Reduces the state to the final report.
    pub(crate) fn into_report(self, downloads: &[Download], attempts: u32) -> Report {
        let mut seen = HashSet::new();
        let failed = downloads
            .iter()
            .map(|d| d.source.as_str())
            .filter(|url| seen.insert(*url))
            .filter(|url| !self.downloaded.contains_key(*url))
            .filter(|url| self.failures.get(*url).is_some_and(|n| *n >= attempts))
            .map(String::from)
            .collect();

        Report {
            downloaded: self.downloaded,
            failed,
        }
    }

    fn remove_pending(&mut self, url: &str) {
        if let Some(index) = self.pending.iter().position(|u| u == url) {
            self.pending.swap_remove(index);
        }
    }
}
