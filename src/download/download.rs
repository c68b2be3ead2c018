//! A single URL bound to its destination on disk.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::download::Download;
//! use std::path::{Path, PathBuf};
//!
//! // Destination derived from the last path segment of the URL.
//! let d = Download::into_directory("https://example.com/files/archive.zip", Path::new("/tmp/out"))?;
//! assert_eq!(d.path, PathBuf::from("/tmp/out/archive.zip"));
//!
//! // Explicit destination.
//! let d = Download::new("https://example.com/files/archive.zip", "/tmp/renamed.zip")?;
//! assert_eq!(d.path, PathBuf::from("/tmp/renamed.zip"));
//! # Ok::<(), lanefetch::Error>(())
//! ```

use crate::error::{Error, Result};

use reqwest::Url;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// The URL exactly as the caller gave it. Reports are keyed by it.
    pub source: String,
    /// Parsed URL of the file to download.
    pub url: Url,
    /// Where the file is written.
    pub path: PathBuf,
}

impl Download {
    /// Creates a [`Download`] writing to an explicit path.
    pub fn new(source: &str, path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            source: source.to_string(),
            url: parse(source)?,
            path: path.into(),
        })
    }

    /// Creates a [`Download`] writing into `directory`, named after the URL.
    ///
    /// See [`Download::file_name`] for how the name is picked.
    pub fn into_directory(source: &str, directory: &Path) -> Result<Self> {
        let url = parse(source)?;
        let path = directory.join(Self::file_name(&url)?);
        Ok(Self {
            source: source.to_string(),
            url,
            path,
        })
    }

    /// Returns the last non-empty segment of the URL path.
    ///
    /// The segment is used verbatim: percent-encoded characters are kept as is.
    /// Trailing slashes are ignored, so `https://host/dir/` yields `dir`.
    pub fn file_name(url: &Url) -> Result<String> {
        url.path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a valid path", url))
            })?
            .filter(|segment| !segment.is_empty())
            .next_back()
            .map(String::from)
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", url))
            })
    }
}

fn parse(source: &str) -> Result<Url> {
    Url::parse(source)
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", source, e)))
}
