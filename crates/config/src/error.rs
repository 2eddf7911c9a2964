//! Configuration Error Types
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// The configuration file's extension isn't one of `toml`, `yaml`, `yml`
    /// or `json`.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// The merged configuration could not be deserialized (bad syntax, wrong
    /// types, unknown extension).
    #[display("invalid configuration")]
    Invalid,
    /// The page range is empty.
    #[display("invalid page range: start ({start}) is greater than end ({end})")]
    InvalidRange { start: u32, end: u32 },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            // The file might be created in the meantime.
            Self::NotFound(_) => true,
            Self::UnsupportedFormat(_) | Self::Invalid | Self::InvalidRange { .. } => false,
        }
    }
}
