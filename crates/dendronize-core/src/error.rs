//! Error types for the vault import system.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Per-file failures never surface as `Error` values to the caller of an
//! import run; they are rendered into strings and accumulated in
//! [`RunStats::errors`](crate::RunStats::errors). Only run-level failures
//! (root scan, nothing to import) propagate as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all import operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid file path (not a directory, not UTF-8, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// The source root itself could not be enumerated
    #[error("Failed to scan {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Neither Markdown nor eligible asset files were discovered
    #[error("No files found to import in {path}")]
    NothingToImport { path: PathBuf },

    /// Parse / decode error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a root scan failure
    pub fn scan_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ScanFailed {
            path: path.into(),
            source,
        }
    }

    /// Create the "nothing to import" failure
    pub fn nothing_to_import(path: impl Into<PathBuf>) -> Self {
        Error::NothingToImport { path: path.into() }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error aborts a whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ScanFailed { .. } | Error::NothingToImport { .. })
    }
}
