//! The `DiffError` type. Every failure is fatal to the run that hit it, so each
//! variant names the file involved and keeps the underlying I/O error as its
//! `source()`.

use std::io;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DiffError>;

/// Everything that can stop `DiffEngine` from producing its `Stats`
#[derive(Error, Debug)]
pub enum DiffError {
    /// The input doesn't exist or can't be opened for reading
    #[error("Can't open file: {path}")]
    SourceOpen {
        /// The input, formatted for display
        path: String,
        /// What the operating system told us
        source: io::Error,
    },

    /// An I/O error while reading an input
    #[error("Error reading file: {path}")]
    SourceRead {
        /// The input, formatted for display
        path: String,
        /// What the operating system told us
        source: io::Error,
    },

    /// A record longer than the configured maximum line length
    #[error("Line {line} of {path} is longer than {limit} bytes")]
    LineTooLong {
        /// The input, formatted for display
        path: String,
        /// One-based record number of the offending line
        line: usize,
        /// The maximum line length in effect
        limit: usize,
    },

    /// The output can't be created or truncated
    #[error("Can't create file: {path}")]
    SinkCreate {
        /// The output, formatted for display
        path: String,
        /// What the operating system told us
        source: io::Error,
    },

    /// An I/O error while writing a batch to an output
    #[error("Error writing file: {path}")]
    SinkWrite {
        /// The output, formatted for display
        path: String,
        /// What the operating system told us
        source: io::Error,
    },
}

impl DiffError {
    /// The display name of the file this error is about
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            DiffError::SourceOpen { path, .. }
            | DiffError::SourceRead { path, .. }
            | DiffError::LineTooLong { path, .. }
            | DiffError::SinkCreate { path, .. }
            | DiffError::SinkWrite { path, .. } => path,
        }
    }
}
