//! # Binary Cursor
//!
//! Bounds-checked sequential reader and writer over byte buffers.
//!
//! ## Design
//!
//! - Fixed-width values go through `bytemuck::Pod`, no per-type code
//! - Every access that would cross the end of the buffer fails with
//!   [`CursorError::OutOfBounds`] and leaves the cursor where it was
//! - Strings are length-prefixed: `u64` length (including a trailing NUL),
//!   then the bytes, then the NUL
//! - No endianness conversion, values are written in host byte order
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::cursor::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write(42u32).unwrap();
//! writer.write_string("crate").unwrap();
//!
//! let bytes = writer.into_inner();
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read::<u32>().unwrap(), 42);
//! assert_eq!(reader.read_string().unwrap(), "crate");
//! ```

use bytemuck::Pod;

use crate::error::{CursorError, CursorResult};

/// Sequential reader over a borrowed byte buffer.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Current read offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Total size of the underlying buffer.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the underlying buffer is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Borrows the next `count` bytes without advancing.
    fn peek(&self, count: usize) -> CursorResult<&'a [u8]> {
        let out_of_bounds = CursorError::OutOfBounds {
            offset: self.position,
            requested: count,
            len: self.buffer.len(),
        };
        let end = self.position.checked_add(count).ok_or(out_of_bounds.clone())?;
        self.buffer.get(self.position..end).ok_or(out_of_bounds)
    }

    /// Borrows the next `count` bytes and advances past them.
    fn take(&mut self, count: usize) -> CursorResult<&'a [u8]> {
        let bytes = self.peek(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Reads one fixed-width value.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if fewer than `size_of::<T>()` bytes remain.
    pub fn read<T: Pod>(&mut self) -> CursorResult<T> {
        let bytes = self.take(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Advances past one fixed-width value without decoding it.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if fewer than `size_of::<T>()` bytes remain.
    pub fn skip<T: Pod>(&mut self) -> CursorResult<()> {
        self.take(std::mem::size_of::<T>()).map(|_| ())
    }

    /// Advances past `count` raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if fewer than `count` bytes remain.
    pub fn skip_bytes(&mut self, count: usize) -> CursorResult<()> {
        self.take(count).map(|_| ())
    }

    /// Reads a bool stored as one byte (non-zero is true).
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` at the end of the buffer.
    pub fn read_bool(&mut self) -> CursorResult<bool> {
        Ok(self.read::<u8>()? != 0)
    }

    /// Reads a platform-width unsigned integer (stored as `u64`).
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` at the end of the buffer, or `LengthOverflow`
    /// if the value does not fit in `usize`.
    pub fn read_usize(&mut self) -> CursorResult<usize> {
        let value = self.read::<u64>()?;
        usize::try_from(value).map_err(|_| CursorError::LengthOverflow(value))
    }

    /// Copies exactly `len` bytes into an empty string.
    ///
    /// # Errors
    ///
    /// - `DestinationNotEmpty` if `dest` already holds text
    /// - `OutOfBounds` if fewer than `len` bytes remain
    /// - `InvalidUtf8` if the bytes are not UTF-8 (the cursor does not move)
    pub fn read_string_into(&mut self, len: usize, dest: &mut String) -> CursorResult<()> {
        if !dest.is_empty() {
            return Err(CursorError::DestinationNotEmpty);
        }
        let bytes = self.peek(len)?;
        let text = std::str::from_utf8(bytes).map_err(|_| CursorError::InvalidUtf8)?;
        dest.push_str(text);
        self.position += len;
        Ok(())
    }

    /// Reads a length-prefixed string written by [`ByteWriter::write_string`].
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, `LengthOverflow` or `InvalidUtf8`.
    pub fn read_string(&mut self) -> CursorResult<String> {
        let start = self.position;
        let len = self.read_usize()?;
        let bytes = match self.take(len) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.position = start;
                return Err(e);
            }
        };
        let body = bytes.strip_suffix(&[0]).unwrap_or(bytes);
        match std::str::from_utf8(body) {
            Ok(text) => Ok(text.to_owned()),
            Err(_) => {
                self.position = start;
                Err(CursorError::InvalidUtf8)
            }
        }
    }

    /// Bulk-copies `count` values into an empty vector.
    ///
    /// # Errors
    ///
    /// - `DestinationNotEmpty` if `dest` already holds values
    /// - `OutOfBounds` if fewer than `count * size_of::<T>()` bytes remain
    pub fn read_buffer_into<T: Pod>(&mut self, count: usize, dest: &mut Vec<T>) -> CursorResult<()> {
        if !dest.is_empty() {
            return Err(CursorError::DestinationNotEmpty);
        }

        let size = std::mem::size_of::<T>();
        if size == 0 {
            dest.resize(count, T::zeroed());
            return Ok(());
        }

        let total = count.checked_mul(size).ok_or(CursorError::OutOfBounds {
            offset: self.position,
            requested: usize::MAX,
            len: self.buffer.len(),
        })?;
        let bytes = self.take(total)?;
        dest.reserve_exact(count);
        dest.extend(bytes.chunks_exact(size).map(bytemuck::pod_read_unaligned::<T>));
        Ok(())
    }

    /// Reads a `usize` count followed by that many values.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read_buffer_into`].
    pub fn read_sequence<T: Pod>(&mut self) -> CursorResult<Vec<T>> {
        let count = self.read_usize()?;
        let mut values = Vec::new();
        self.read_buffer_into(count, &mut values)?;
        Ok(values)
    }
}

/// Append-only writer over an owned byte buffer.
///
/// A writer created with [`ByteWriter::with_limit`] refuses to grow past
/// its limit; the default writer is unbounded.
#[derive(Clone, Debug, Default)]
pub struct ByteWriter {
    buffer: Vec<u8>,
    limit: Option<usize>,
}

impl ByteWriter {
    /// Creates an empty, unbounded writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            limit: None,
        }
    }

    /// Creates a writer that fails once `limit` bytes have been written.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the written bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning the buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    fn ensure_room(&self, count: usize) -> CursorResult<()> {
        if let Some(limit) = self.limit {
            if self.buffer.len().saturating_add(count) > limit {
                return Err(CursorError::OutOfBounds {
                    offset: self.buffer.len(),
                    requested: count,
                    len: limit,
                });
            }
        }
        Ok(())
    }

    /// Appends raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CursorResult<()> {
        self.ensure_room(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends one fixed-width value.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write<T: Pod>(&mut self, value: T) -> CursorResult<()> {
        self.write_bytes(bytemuck::bytes_of(&value))
    }

    /// Appends a bool as one byte.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_bool(&mut self, value: bool) -> CursorResult<()> {
        self.write(u8::from(value))
    }

    /// Appends a platform-width unsigned integer as `u64`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_usize(&mut self, value: usize) -> CursorResult<()> {
        self.write(value as u64)
    }

    /// Appends a slice (or fixed-size array) of values with no prefix.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_buffer<T: Pod>(&mut self, values: &[T]) -> CursorResult<()> {
        self.write_bytes(bytemuck::cast_slice(values))
    }

    /// Appends a `usize` count followed by the values.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_sequence<T: Pod>(&mut self, values: &[T]) -> CursorResult<()> {
        self.ensure_room(8 + std::mem::size_of_val(values))?;
        self.write_usize(values.len())?;
        self.write_buffer(values)
    }

    /// Appends a length-prefixed, NUL-terminated string.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the write limit would be exceeded.
    pub fn write_string(&mut self, text: &str) -> CursorResult<()> {
        // prefix + bytes + terminator, all or nothing
        self.ensure_room(8 + text.len() + 1)?;
        self.write_usize(text.len() + 1)?;
        self.write_bytes(text.as_bytes())?;
        self.write(0u8)
    }

    /// Overwrites an already-written value at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the value would extend past the written bytes.
    pub fn patch<T: Pod>(&mut self, offset: usize, value: T) -> CursorResult<()> {
        let bytes = bytemuck::bytes_of(&value);
        let len = self.buffer.len();
        let target = offset
            .checked_add(bytes.len())
            .and_then(|end| self.buffer.get_mut(offset..end))
            .ok_or(CursorError::OutOfBounds {
                offset,
                requested: bytes.len(),
                len,
            })?;
        target.copy_from_slice(bytes);
        Ok(())
    }
}

impl std::io::Write for ByteWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::WriteZero, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_write_respects_limit() {
        use std::io::Write as _;

        let mut writer = ByteWriter::with_limit(4);
        writer.write_all(b"abc").unwrap();
        let err = writer.write_all(b"de").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);
        assert_eq!(writer.as_slice(), b"abc");
    }

    #[test]
    fn test_read_past_end_fails_without_moving() {
        let bytes = [1u8, 2, 3];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read::<u16>().unwrap(), u16::from_ne_bytes([1, 2]));

        let err = reader.read::<u32>().unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfBounds { offset: 2, requested: 4, len: 3 }
        );
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read::<u8>().unwrap(), 3);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_skip() {
        let mut writer = ByteWriter::new();
        writer.write(7u64).unwrap();
        writer.write(9u8).unwrap();
        let bytes = writer.into_inner();

        let mut reader = ByteReader::new(&bytes);
        reader.skip::<u64>().unwrap();
        assert_eq!(reader.read::<u8>().unwrap(), 9);
        assert!(reader.skip::<u8>().is_err());
    }

    #[test]
    fn test_string_layout_includes_terminator() {
        let mut writer = ByteWriter::new();
        writer.write_string("abc").unwrap();
        let bytes = writer.into_inner();

        assert_eq!(bytes.len(), 8 + 4);
        assert_eq!(u64::from_ne_bytes(bytes[..8].try_into().unwrap()), 4);
        assert_eq!(&bytes[8..], b"abc\0");

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_string().unwrap(), "abc");
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_read_string_into_requires_empty_destination() {
        let bytes = b"hello";
        let mut reader = ByteReader::new(bytes);

        let mut dest = String::from("x");
        assert_eq!(
            reader.read_string_into(5, &mut dest),
            Err(CursorError::DestinationNotEmpty)
        );

        let mut dest = String::new();
        reader.read_string_into(5, &mut dest).unwrap();
        assert_eq!(dest, "hello");

        let mut dest = String::new();
        assert!(matches!(
            reader.read_string_into(1, &mut dest),
            Err(CursorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_does_not_advance() {
        let bytes = [0xffu8, 0xfe];
        let mut reader = ByteReader::new(&bytes);
        let mut dest = String::new();
        assert_eq!(
            reader.read_string_into(2, &mut dest),
            Err(CursorError::InvalidUtf8)
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_buffer_roundtrip_and_empty_rule() {
        let mut writer = ByteWriter::new();
        writer.write_sequence(&[1.5f32, -2.0, 3.25]).unwrap();
        writer.write_buffer(&[10u16, 20]).unwrap();
        let bytes = writer.into_inner();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_sequence::<f32>().unwrap(), vec![1.5, -2.0, 3.25]);

        let mut dest = vec![1u16];
        assert_eq!(
            reader.read_buffer_into(2, &mut dest),
            Err(CursorError::DestinationNotEmpty)
        );
        let mut dest = Vec::new();
        reader.read_buffer_into::<u16>(2, &mut dest).unwrap();
        assert_eq!(dest, vec![10, 20]);
    }

    #[test]
    fn test_huge_count_is_out_of_bounds() {
        let mut writer = ByteWriter::new();
        writer.write_usize(usize::MAX / 2).unwrap();
        let bytes = writer.into_inner();

        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            reader.read_sequence::<u32>(),
            Err(CursorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_write_limit() {
        let mut writer = ByteWriter::with_limit(6);
        writer.write(1u32).unwrap();
        assert!(matches!(
            writer.write(1u32),
            Err(CursorError::OutOfBounds { offset: 4, requested: 4, len: 6 })
        ));
        writer.write(1u16).unwrap();
        assert_eq!(writer.len(), 6);
        assert!(writer.write_string("").is_err());
    }

    #[test]
    fn test_patch() {
        let mut writer = ByteWriter::new();
        writer.write(0u32).unwrap();
        writer.write(0u32).unwrap();
        writer.patch(4, 0xdead_beef_u32).unwrap();
        assert!(writer.patch(6, 1u32).is_err());

        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read::<u32>().unwrap(), 0);
        assert_eq!(reader.read::<u32>().unwrap(), 0xdead_beef);
    }
}
