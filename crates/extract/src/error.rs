//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Page-level anomalies are never errors: they are recorded as warnings on the
//! page itself. Only input that cannot be turned into text ends up here.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document is not valid in the only encodings we are allowed to try.
    /// Re-acquire the source; never retry with lossy decoding.
    #[display(
        "document is not valid {encoding}{}",
        offset.map(|o| format!(" (first invalid byte at offset {o})")).unwrap_or_default()
    )]
    Decode {
        /// Name of the last encoding attempted.
        encoding: &'static str,
        /// Byte offset of the first invalid sequence, when known.
        offset: Option<usize>,
    },
    /// The document declares a charset that is not recognised.
    #[display("unknown declared encoding: {_0}")]
    UnknownEncoding(#[error(not(source))] String),
    /// A value could not be parsed back into one of the page model types.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Decoding is a pure function of the input bytes.
        false
    }
}
