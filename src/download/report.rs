//! Final outcome of a batch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Partition of a batch into downloaded and permanently failed URLs.
///
/// A URL that failed a few times and then succeeded only shows up in
/// [`Report::downloaded`]. [`Report::failed`] lists the URLs that used up all
/// of their attempts, in the order they were first given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Downloaded URLs and the file each one was written to.
    pub downloaded: HashMap<String, PathBuf>,
    /// URLs for which every attempt failed.
    pub failed: Vec<String>,
}

impl Report {
    /// Returns `true` if no URL failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Local path of a downloaded URL.
    pub fn path(&self, url: &str) -> Option<&Path> {
        self.downloaded.get(url).map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_complete() {
        let report = Report::default();
        assert!(report.is_complete());
        assert!(report.downloaded.is_empty());
    }

    #[test]
    fn test_path_lookup() {
        let mut report = Report::default();
        report
            .downloaded
            .insert("http://a/x.bin".into(), PathBuf::from("/tmp/out/x.bin"));
        report.failed.push("http://b/y.bin".into());

        assert_eq!(report.path("http://a/x.bin"), Some(Path::new("/tmp/out/x.bin")));
        assert_eq!(report.path("http://b/y.bin"), None);
        assert!(!report.is_complete());
    }
}
