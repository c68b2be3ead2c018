//! Error handling for the lanefetch library.
//!
//! Errors fall into two families. Usage errors (bad options, bad lane count)
//! are returned to the caller before any work is scheduled. Transfer errors
//! (bad status, connection failures, socket timeouts) happen inside a single
//! download attempt and are turned into retry bookkeeping instead of being
//! returned.

use reqwest::StatusCode;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can happen when using lanefetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Used for failures that don't fit other categories, such as building a
    /// pool outside of a tokio runtime.
    #[error("Internal error: {0}")]
    Internal(String),

    /// An argument was outside of its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Neither a destination directory nor a list of paths was provided.
    #[error("Option 'directory' or 'paths' should be provided")]
    MissingDestination,

    /// The list of destination paths does not match the list of URLs.
    #[error("Length of 'paths' should be {expected}, got {actual}")]
    PathCountMismatch { expected: usize, actual: usize },

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with something other than `200 OK`.
    #[error("Response {0}")]
    Status(StatusCode),

    /// No bytes moved on the socket for the configured duration.
    #[error("socket timeout after {0:?}")]
    Timeout(Duration),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack.
    #[error("Middleware Error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

impl Error {
    /// Returns `true` for failures of a single transfer attempt.
    ///
    /// These errors are never handed back to the batch caller: the attempt is
    /// either retried or the URL ends up in the `failed` list of the report.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            Error::Status(_)
                | Error::Timeout(_)
                | Error::IOError { .. }
                | Error::Reqwest { .. }
                | Error::Middleware { .. }
        )
    }

    /// Returns `true` for errors caused by how the library was called.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_)
                | Error::MissingDestination
                | Error::PathCountMismatch { .. }
                | Error::InvalidUrl(_)
        )
    }
}

/// Result type alias for operations that can fail with a lanefetch error.
pub type Result<T> = std::result::Result<T, Error>;
