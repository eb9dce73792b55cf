//! # Asset Error Types
//!
//! All errors that can occur while reading or writing asset containers.

use std::path::PathBuf;

use hearth_core::CursorError;
use thiserror::Error;

/// Errors that can occur in the asset layer.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be opened, read or written.
    #[error("cannot open file {}: {source}", .path.display())]
    CantOpenFile {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The container header is missing or inconsistent with the buffer.
    #[error("invalid container header: {0}")]
    InvalidHeader(String),

    /// The container body or payload is corrupt.
    #[error("invalid container body: {0}")]
    InvalidBody(String),

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The compressor failed to finish its stream.
    #[error("compression failed: {0}")]
    CompressionError(String),

    /// The container holds a different kind of asset.
    #[error("incorrect format: {0}")]
    IncorrectFormat(String),

    /// The container kind is right but its layout version is not.
    #[error("incorrect {what} version: expected {expected}, found {found}")]
    IncorrectVersion {
        /// Which version byte failed.
        what: &'static str,
        /// Version this build reads.
        expected: u8,
        /// Version stored in the file.
        found: u8,
    },

    /// A named entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything else.
    #[error("unknown error: {0}")]
    Unknown(String),

    /// A payload read or write crossed a buffer boundary.
    #[error(transparent)]
    Cursor(#[from] CursorError),
}

/// Flat error taxonomy, independent of payload details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AssetError::FileNotFound`]
    FileNotFound,
    /// See [`AssetError::CantOpenFile`]
    CantOpenFile,
    /// See [`AssetError::InvalidHeader`]
    InvalidHeader,
    /// See [`AssetError::InvalidBody`]; also cursor failures inside a payload
    InvalidBody,
    /// See [`AssetError::InvalidArgument`]
    InvalidArgument,
    /// See [`AssetError::CompressionError`]
    CompressionError,
    /// See [`AssetError::IncorrectFormat`]
    IncorrectFormat,
    /// See [`AssetError::IncorrectVersion`]
    IncorrectVersion,
    /// See [`AssetError::NotFound`]
    NotFound,
    /// See [`AssetError::Unknown`]
    Unknown,
}

impl AssetError {
    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::CantOpenFile { .. } => ErrorKind::CantOpenFile,
            Self::InvalidHeader(_) => ErrorKind::InvalidHeader,
            Self::InvalidBody(_) | Self::Cursor(_) => ErrorKind::InvalidBody,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::CompressionError(_) => ErrorKind::CompressionError,
            Self::IncorrectFormat(_) => ErrorKind::IncorrectFormat,
            Self::IncorrectVersion { .. } => ErrorKind::IncorrectVersion,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
