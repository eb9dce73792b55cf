//! # Core Error Types
//!
//! Failures raised by the binary cursor and the parameter codec.

use thiserror::Error;

/// Errors that can occur while reading or writing a byte buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// A read or write would cross the end of the buffer.
    #[error("out of bounds: {requested} bytes at offset {offset}, buffer holds {len}")]
    OutOfBounds {
        /// Cursor offset when the access was attempted.
        offset: usize,
        /// Number of bytes the access needed.
        requested: usize,
        /// Size of the buffer (or write limit).
        len: usize,
    },

    /// A bulk read targeted a destination that already holds data.
    #[error("destination must be empty before a bulk read")]
    DestinationNotEmpty,

    /// String bytes were not valid UTF-8.
    #[error("string data is not valid UTF-8")]
    InvalidUtf8,

    /// A length prefix does not fit in this platform's `usize`.
    #[error("length prefix {0} does not fit in memory")]
    LengthOverflow(u64),

    /// A param discriminant byte did not name a known type.
    #[error("unknown param type tag {0}")]
    UnknownParamType(u8),

    /// A keyed record listed the same key twice.
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),
}

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;
