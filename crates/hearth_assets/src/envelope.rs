//! # Typed Asset Envelope
//!
//! The decompressed payload of every container starts with two version
//! bytes, followed by the asset's own fields:
//!
//! ```text
//! [u8 container_version][u8 type_version][fields...]
//! ```
//!
//! Loading checks, in order:
//!
//! 1. the container's type tag matches the requested asset (`IncorrectFormat`)
//! 2. the container version matches [`CONTAINER_FORMAT_VERSION`] and the type
//!    version matches the asset's `VERSION` (`IncorrectVersion`)
//! 3. the fields decode and consume the payload exactly (`InvalidBody`)
//!
//! There is no upgrade path: a stale version is always an error.

use std::fmt;
use std::path::Path;

use hearth_core::{ByteReader, ByteWriter};

use crate::container::{self, ContainerConfig};
use crate::error::{AssetError, AssetResult};

/// Version of the envelope layout itself.
pub const CONTAINER_FORMAT_VERSION: u8 = 1;

/// Size of the version prefix in every payload.
const PREFIX_SIZE: usize = 2;

/// Asset kinds and their container type tags.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Game configuration
    Config = 1,
    /// Key/value data table
    Data = 2,
    /// Level geometry and actors
    Level = 3,
    /// Encoded audio
    Sound = 4,
    /// Bitmap font
    Font = 5,
    /// Pre-compiled shader
    Shader = 6,
    /// RGBA texture
    Texture = 7,
}

impl AssetKind {
    /// Decodes a container type tag.
    #[must_use]
    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Config),
            2 => Some(Self::Data),
            3 => Some(Self::Level),
            4 => Some(Self::Sound),
            5 => Some(Self::Font),
            6 => Some(Self::Shader),
            7 => Some(Self::Texture),
            _ => None,
        }
    }

    /// Container type tag.
    #[must_use]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Data => "data",
            Self::Level => "level",
            Self::Sound => "sound",
            Self::Font => "font",
            Self::Shader => "shader",
            Self::Texture => "texture",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decompressed, not yet decoded asset.
///
/// Produced only by the codec and consumed by [`AssetEnvelope::into_asset`].
#[derive(Debug)]
pub struct AssetEnvelope {
    kind: AssetKind,
    container_version: u8,
    type_version: u8,
    payload: Vec<u8>,
}

impl AssetEnvelope {
    /// Inflates a container and reads its version prefix.
    ///
    /// # Errors
    ///
    /// Codec errors, `IncorrectFormat` for an unknown type tag, or
    /// `InvalidBody` if the payload is shorter than the version prefix.
    pub fn from_container_bytes(bytes: &[u8]) -> AssetResult<Self> {
        let (tag, payload) = container::decompress(bytes)?;
        Self::from_payload(tag, payload)
    }

    /// Reads and inflates a container file.
    ///
    /// # Errors
    ///
    /// As [`container::load_from_file`] and [`Self::from_container_bytes`].
    pub fn load(path: impl AsRef<Path>) -> AssetResult<Self> {
        let (tag, payload) = container::load_from_file(path)?;
        Self::from_payload(tag, payload)
    }

    fn from_payload(tag: u32, payload: Vec<u8>) -> AssetResult<Self> {
        let kind = AssetKind::from_tag(tag)
            .ok_or_else(|| AssetError::IncorrectFormat(format!("unknown type tag {tag}")))?;

        let mut reader = ByteReader::new(&payload);
        let (container_version, type_version) = match (reader.read::<u8>(), reader.read::<u8>()) {
            (Ok(c), Ok(t)) => (c, t),
            _ => {
                return Err(AssetError::InvalidBody(format!(
                    "{kind} payload is missing its version prefix"
                )))
            }
        };

        Ok(Self {
            kind,
            container_version,
            type_version,
            payload,
        })
    }

    /// Asset kind named by the container tag.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Envelope layout version stored in the payload.
    #[must_use]
    pub const fn container_version(&self) -> u8 {
        self.container_version
    }

    /// Asset layout version stored in the payload.
    #[must_use]
    pub const fn type_version(&self) -> u8 {
        self.type_version
    }

    /// Bytes of asset fields after the version prefix.
    #[must_use]
    pub fn payload_size(&self) -> usize {
        self.payload.len() - PREFIX_SIZE
    }

    /// Decodes the envelope as `T`, consuming it.
    ///
    /// # Errors
    ///
    /// `IncorrectFormat`, `IncorrectVersion` or `InvalidBody` per the
    /// module-level checks, or any error from `T::read_fields`.
    pub fn into_asset<T: TypedAsset>(self) -> AssetResult<T> {
        if self.kind != T::KIND {
            return Err(AssetError::IncorrectFormat(format!(
                "expected a {} asset, container holds {}",
                T::KIND,
                self.kind
            )));
        }
        if self.container_version != CONTAINER_FORMAT_VERSION {
            return Err(AssetError::IncorrectVersion {
                what: "container",
                expected: CONTAINER_FORMAT_VERSION,
                found: self.container_version,
            });
        }
        if self.type_version != T::VERSION {
            return Err(AssetError::IncorrectVersion {
                what: T::KIND.name(),
                expected: T::VERSION,
                found: self.type_version,
            });
        }

        let mut reader = ByteReader::new(&self.payload);
        reader.skip_bytes(PREFIX_SIZE)?;
        let asset = T::read_fields(&mut reader)?;

        if !reader.is_at_end() {
            return Err(AssetError::InvalidBody(format!(
                "{} trailing bytes after {} fields",
                reader.remaining(),
                T::KIND
            )));
        }
        Ok(asset)
    }
}

/// A record stored in its own container kind.
///
/// Implementors provide the field codec; loading, saving and the version
/// gates come for free.
pub trait TypedAsset: Sized {
    /// Container kind of this asset.
    const KIND: AssetKind;

    /// Field layout version, bumped on every layout change.
    const VERSION: u8;

    /// Decodes the fields written by [`TypedAsset::write_fields`].
    ///
    /// # Errors
    ///
    /// Cursor errors or `InvalidBody` for inconsistent data.
    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self>;

    /// Encodes the fields in a fixed order.
    ///
    /// # Errors
    ///
    /// Cursor errors or `InvalidArgument` for unrepresentable data.
    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()>;

    /// Encodes the version prefix and fields.
    ///
    /// # Errors
    ///
    /// As [`TypedAsset::write_fields`].
    fn to_payload(&self) -> AssetResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        writer.write(CONTAINER_FORMAT_VERSION)?;
        writer.write(Self::VERSION)?;
        self.write_fields(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Decodes a whole container held in memory.
    ///
    /// # Errors
    ///
    /// See [`AssetEnvelope::into_asset`].
    fn from_container_bytes(bytes: &[u8]) -> AssetResult<Self> {
        AssetEnvelope::from_container_bytes(bytes)?.into_asset()
    }

    /// Encodes a whole container in memory.
    ///
    /// # Errors
    ///
    /// Field or codec errors.
    fn to_container_bytes(&self, config: &ContainerConfig) -> AssetResult<Vec<u8>> {
        container::compress(&self.to_payload()?, Self::KIND.tag(), config)
    }

    /// Loads the asset from a container file.
    ///
    /// # Errors
    ///
    /// I/O, codec, format, version and field errors.
    fn create_from_asset(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let asset = AssetEnvelope::load(path)?.into_asset()?;
        tracing::debug!(path = %path.display(), kind = %Self::KIND, "loaded asset");
        Ok(asset)
    }

    /// Saves the asset with default container settings.
    ///
    /// # Errors
    ///
    /// Field, codec and I/O errors.
    fn save_as_asset(&self, path: impl AsRef<Path>) -> AssetResult<()> {
        self.save_as_asset_with(path, &ContainerConfig::default())
    }

    /// Saves the asset with explicit container settings.
    ///
    /// # Errors
    ///
    /// Field, codec and I/O errors.
    fn save_as_asset_with(&self, path: impl AsRef<Path>, config: &ContainerConfig) -> AssetResult<()> {
        let path = path.as_ref();
        container::save_to_file(path, Self::KIND.tag(), &self.to_payload()?, config)?;
        tracing::debug!(path = %path.display(), kind = %Self::KIND, "saved asset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: u32,
    }

    impl TypedAsset for Counter {
        const KIND: AssetKind = AssetKind::Data;
        const VERSION: u8 = 4;

        fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
            Ok(Self { value: reader.read()? })
        }

        fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
            writer.write(self.value)?;
            Ok(())
        }
    }

    fn container_with(tag: u32, payload: &[u8]) -> Vec<u8> {
        container::compress(payload, tag, &ContainerConfig::default()).unwrap()
    }

    #[test]
    fn test_kind_tags() {
        for tag in 1..=7 {
            assert_eq!(AssetKind::from_tag(tag).unwrap().tag(), tag);
        }
        assert_eq!(AssetKind::from_tag(0), None);
        assert_eq!(AssetKind::from_tag(8), None);
    }

    #[test]
    fn test_roundtrip_in_memory() {
        let bytes = Counter { value: 99 }
            .to_container_bytes(&ContainerConfig::default())
            .unwrap();
        let envelope = AssetEnvelope::from_container_bytes(&bytes).unwrap();
        assert_eq!(envelope.kind(), AssetKind::Data);
        assert_eq!(envelope.container_version(), CONTAINER_FORMAT_VERSION);
        assert_eq!(envelope.type_version(), 4);
        assert_eq!(envelope.payload_size(), 4);
        assert_eq!(envelope.into_asset::<Counter>().unwrap(), Counter { value: 99 });
    }

    #[test]
    fn test_type_gate() {
        let bytes = container_with(AssetKind::Font.tag(), &[1, 4, 0, 0, 0, 0]);
        let err = Counter::from_container_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectFormat);

        let bytes = container_with(99, &[1, 4]);
        let err = Counter::from_container_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectFormat);
    }

    #[test]
    fn test_version_gates() {
        let bytes = container_with(AssetKind::Data.tag(), &[1, 3, 0, 0, 0, 0]);
        let err = Counter::from_container_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            AssetError::IncorrectVersion { expected: 4, found: 3, .. }
        ));

        let bytes = container_with(AssetKind::Data.tag(), &[2, 4, 0, 0, 0, 0]);
        let err = Counter::from_container_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            AssetError::IncorrectVersion { what: "container", .. }
        ));
    }

    #[test]
    fn test_short_and_trailing_payloads() {
        let bytes = container_with(AssetKind::Data.tag(), &[1]);
        assert_eq!(
            Counter::from_container_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidBody
        );

        let bytes = container_with(AssetKind::Data.tag(), &[1, 4, 0, 0]);
        assert_eq!(
            Counter::from_container_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidBody
        );

        let bytes = container_with(AssetKind::Data.tag(), &[1, 4, 0, 0, 0, 0, 9]);
        assert_eq!(
            Counter::from_container_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidBody
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.asset");
        Counter { value: 7 }.save_as_asset(&path).unwrap();
        assert_eq!(Counter::create_from_asset(&path).unwrap(), Counter { value: 7 });

        let err = Counter { value: 7 }
            .save_as_asset(dir.path().join("missing_dir").join("x.asset"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CantOpenFile);
    }
}
