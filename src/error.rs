//! Error types for litescan.
//!
//! Each failure mode gets its own variant rather than a single stringly-typed
//! error, following the per-module error enum style used throughout this
//! crate's ambient I/O layers (see [`crate::mmap_file::MmapError`]).

use std::fmt;
use std::path::PathBuf;

/// Result type alias for litescan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by matcher construction and scanning.
#[derive(Debug)]
pub enum Error {
    /// Construction failed because no non-empty pattern remained after
    /// filtering.
    EmptyPatternSet,

    /// An I/O operation (open, read, or mmap) failed.
    Io {
        /// Path that was being operated on, if known.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A non-positive chunk size or thread count was supplied.
    InvalidChunkSize(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyPatternSet => write!(f, "Pattern set cannot be empty"),
            Error::Io { path: Some(p), source } => {
                write!(f, "I/O error on {}: {}", p.display(), source)
            }
            Error::Io { path: None, source } => write!(f, "I/O error: {}", source),
            Error::InvalidChunkSize(n) => {
                write!(f, "invalid chunk size: {} (must be positive)", n)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Attach a path to an I/O error for a more useful message.
    pub(crate) fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Fill in a path on an `Io` error that doesn't have one yet (e.g. one
    /// that arrived via `From<std::io::Error>` through `?` from code that
    /// doesn't know which path it's operating on). Other variants pass
    /// through unchanged.
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Io { path: None, source } => Error::Io {
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }
}
