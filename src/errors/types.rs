//! Error type definitions for the playlist curator
//!
//! The taxonomy mirrors the failure policy of the pipeline: per-source and
//! persistence failures are recoverable and handled with a warning, while a
//! run with no usable source at all is fatal.

use thiserror::Error;

pub type CuratorResult<T> = Result<T, CuratorError>;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum CuratorError {
    /// Source acquisition and parsing errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Every configured source failed or produced no entries
    #[error("No usable source: all configured sources failed or were empty")]
    NoUsableSource,

    /// Learned-alias store read/write failures
    #[error("Persistence error: {path} - {message}")]
    Persistence { path: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Source handling specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// A source could not be fetched or read
    #[error("Source unavailable: {name} - {reason}")]
    Unavailable { name: String, reason: String },

    /// A source answered with a non-success HTTP status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// A source URL or path is not usable
    #[error("Invalid location: {location} - {message}")]
    InvalidLocation { location: String, message: String },
}

/// Convenience methods for creating common error types
impl CuratorError {
    /// Create a persistence error for the learned-alias store
    pub fn persistence<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create an unavailable-source error
    pub fn unavailable<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-location error
    pub fn invalid_location<L: Into<String>, M: Into<String>>(location: L, message: M) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            message: message.into(),
        }
    }
}
