//! # Compressed Container Codec
//!
//! Every asset file is a fixed header followed by one zlib stream.
//!
//! ## Layout
//!
//! ```text
//! [u32 compressed_size][u32 uncompressed_size][u32 reserved = 0][u32 type_tag]
//! [compressed_size bytes of zlib data]
//! ```
//!
//! All integers are host-endian. `reserved` is written as zero and ignored
//! on read.
//!
//! ## Guarantees
//!
//! - Decompression inflates exactly `compressed_size` input bytes
//! - The inflated length must equal `uncompressed_size`, a mismatch is
//!   `InvalidBody`, never a truncated payload
//! - The zlib stream must reach its end marker

use std::io::Write;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use hearth_core::{ByteReader, ByteWriter, CursorResult};
use serde::{Deserialize, Serialize};

use crate::error::{AssetError, AssetResult};

/// Size of [`ContainerHeader`] on disk.
pub const HEADER_SIZE: usize = std::mem::size_of::<ContainerHeader>();

/// Byte offset of `compressed_size` within the header.
const COMPRESSED_SIZE_OFFSET: usize = 0;

/// Output growth step while inflating.
const INFLATE_STEP: usize = 64 * 1024;

/// Compression settings (loaded from TOML by the host).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// zlib level, 0 (store) to 9 (best)
    pub compression_level: u32,
    /// Bytes fed to the encoder per step
    pub chunk_size: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            compression_level: 6,
            chunk_size: 16 * 1024,
        }
    }
}

impl ContainerConfig {
    /// Checks that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a level above 9 or a zero chunk size.
    pub fn validate(&self) -> AssetResult<()> {
        if self.compression_level > 9 {
            return Err(AssetError::InvalidArgument(format!(
                "compression level {} is outside 0..=9",
                self.compression_level
            )));
        }
        if self.chunk_size == 0 {
            return Err(AssetError::InvalidArgument(
                "chunk size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Fixed container header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ContainerHeader {
    /// Bytes of zlib data following the header
    pub compressed_size: u32,
    /// Bytes the zlib data inflates to
    pub uncompressed_size: u32,
    /// Always zero
    pub reserved: u32,
    /// Asset kind tag
    pub type_tag: u32,
}

impl ContainerHeader {
    /// Reads a header.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if fewer than [`HEADER_SIZE`] bytes remain.
    pub fn read(reader: &mut ByteReader<'_>) -> CursorResult<Self> {
        reader.read()
    }

    /// Writes a header.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the writer's limit is exceeded.
    pub fn write(&self, writer: &mut ByteWriter) -> CursorResult<()> {
        writer.write(*self)
    }

    /// Parses the header at the start of a container without inflating it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` if the buffer is too short.
    pub fn peek(bytes: &[u8]) -> AssetResult<Self> {
        Self::read(&mut ByteReader::new(bytes)).map_err(|_| {
            AssetError::InvalidHeader(format!(
                "{} bytes is shorter than the {HEADER_SIZE}-byte header",
                bytes.len()
            ))
        })
    }
}

/// Compresses `payload` into a tagged container.
///
/// The payload is streamed through the encoder in `config.chunk_size`
/// pieces; the compressed size is back-patched into the header once the
/// stream is finished.
///
/// # Errors
///
/// - `InvalidArgument` for a bad config or a payload over `u32::MAX` bytes
/// - `CompressionError` if the encoder fails to finish its stream
pub fn compress(payload: &[u8], type_tag: u32, config: &ContainerConfig) -> AssetResult<Vec<u8>> {
    config.validate()?;

    let uncompressed_size = u32::try_from(payload.len()).map_err(|_| {
        AssetError::InvalidArgument(format!(
            "payload of {} bytes exceeds the container limit",
            payload.len()
        ))
    })?;

    let mut writer = ByteWriter::with_capacity(HEADER_SIZE + payload.len() / 2);
    ContainerHeader {
        compressed_size: 0,
        uncompressed_size,
        reserved: 0,
        type_tag,
    }
    .write(&mut writer)?;

    let mut encoder = ZlibEncoder::new(writer, Compression::new(config.compression_level));
    for chunk in payload.chunks(config.chunk_size) {
        encoder
            .write_all(chunk)
            .map_err(|e| AssetError::CompressionError(e.to_string()))?;
    }
    let mut writer = encoder
        .finish()
        .map_err(|e| AssetError::CompressionError(e.to_string()))?;

    let compressed_size = u32::try_from(writer.len() - HEADER_SIZE).map_err(|_| {
        AssetError::CompressionError("compressed stream exceeds the container limit".into())
    })?;
    writer.patch(COMPRESSED_SIZE_OFFSET, compressed_size)?;

    tracing::debug!(
        type_tag,
        uncompressed = uncompressed_size,
        compressed = compressed_size,
        "compressed container"
    );
    Ok(writer.into_inner())
}

/// Inflates a container, returning its type tag and payload.
///
/// # Errors
///
/// - `InvalidHeader` if the buffer is shorter than a header or shorter than
///   the header's declared compressed size
/// - `InvalidBody` if the stream is corrupt, unterminated, or inflates to a
///   length other than the declared uncompressed size
pub fn decompress(bytes: &[u8]) -> AssetResult<(u32, Vec<u8>)> {
    let header = ContainerHeader::peek(bytes)?;

    let compressed_len = header.compressed_size as usize;
    let body = bytes
        .get(HEADER_SIZE..)
        .and_then(|rest| rest.get(..compressed_len))
        .ok_or_else(|| {
            AssetError::InvalidHeader(format!(
                "header declares {compressed_len} compressed bytes, only {} present",
                bytes.len().saturating_sub(HEADER_SIZE)
            ))
        })?;

    let expected = header.uncompressed_size as usize;
    let payload = inflate(body, expected)?;

    tracing::debug!(
        type_tag = header.type_tag,
        compressed = compressed_len,
        uncompressed = expected,
        "decompressed container"
    );
    Ok((header.type_tag, payload))
}

fn inflate(body: &[u8], expected: usize) -> AssetResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut payload = Vec::with_capacity(expected.saturating_add(1).min(INFLATE_STEP));

    loop {
        if payload.len() > expected {
            return Err(AssetError::InvalidBody(format!(
                "stream inflates past the declared {expected} bytes"
            )));
        }
        if payload.len() == payload.capacity() {
            payload.reserve((expected + 1 - payload.len()).min(INFLATE_STEP));
        }

        let consumed = usize::try_from(inflater.total_in()).unwrap_or(body.len());
        let produced = inflater.total_out();
        let input = body.get(consumed..).unwrap_or_default();

        let status = inflater
            .decompress_vec(input, &mut payload, FlushDecompress::None)
            .map_err(|e| AssetError::InvalidBody(format!("corrupt stream: {e}")))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled = usize::try_from(inflater.total_in()).unwrap_or(body.len()) == consumed
                    && inflater.total_out() == produced;
                if stalled {
                    return Err(AssetError::InvalidBody(
                        "stream ends before its terminator".into(),
                    ));
                }
            }
        }
    }

    if payload.len() != expected {
        return Err(AssetError::InvalidBody(format!(
            "stream inflated to {} bytes, header declares {expected}",
            payload.len()
        )));
    }
    Ok(payload)
}

fn map_read_error(path: &Path, source: std::io::Error) -> AssetError {
    if source.kind() == std::io::ErrorKind::NotFound {
        AssetError::FileNotFound(path.to_path_buf())
    } else {
        AssetError::CantOpenFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads and inflates a container file.
///
/// # Errors
///
/// `FileNotFound` / `CantOpenFile` for I/O failures, otherwise as
/// [`decompress`].
pub fn load_from_file(path: impl AsRef<Path>) -> AssetResult<(u32, Vec<u8>)> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| map_read_error(path, e))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "read container file");
    decompress(&bytes)
}

/// Compresses `payload` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// `CantOpenFile` if the file cannot be created or written, otherwise as
/// [`compress`].
pub fn save_to_file(
    path: impl AsRef<Path>,
    type_tag: u32,
    payload: &[u8],
    config: &ContainerConfig,
) -> AssetResult<()> {
    let path = path.as_ref();
    let bytes = compress(payload, type_tag, config)?;

    let cant_open = |source| AssetError::CantOpenFile {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(cant_open)?;
    file.write_all(&bytes).map_err(cant_open)?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "wrote container file");
    Ok(())
}
