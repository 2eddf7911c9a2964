//! Book Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only input acquisition can fail a book. Everything that goes wrong on an
//! individual page is a warning on that page and a counter in the report.

use std::path::PathBuf;

use derive_more::{Display, Error};

/// A book processing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for book processing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input path does not exist.
    #[display("input not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The input exists but could not be read.
    #[display("input could not be read: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// A directory input contains no file with a numeric stem.
    #[display("no volume files found in {}", _0.display())]
    NoVolumes(#[error(not(source))] PathBuf),
    /// A volume could not be decoded. Lossy decoding is never attempted.
    #[display("volume could not be decoded: {}", _0.display())]
    Decode(#[error(not(source))] PathBuf),
    /// Records or the report could not be written.
    #[display("failed to write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unreadable(_) | Self::Output => true,
            Self::NotFound(_) | Self::NoVolumes(_) | Self::Decode(_) => false,
        }
    }
}
