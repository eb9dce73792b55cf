//! RGBA8 textures.

use hearth_core::{ByteReader, ByteWriter};

use crate::envelope::{AssetKind, TypedAsset};
use crate::error::{AssetError, AssetResult};

/// Sampling filter.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFilter {
    /// Point sampling
    #[default]
    Nearest = 0,
    /// Bilinear sampling
    Linear = 1,
}

impl TextureFilter {
    /// Decodes a filter byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// An uncompressed RGBA8 image.
///
/// Layout: width `u32`, height `u32`, filter `u8`, pixel bytes as a counted
/// buffer of exactly `width * height * 4` bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureAsset {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Sampling filter
    pub filter: TextureFilter,
    /// Row-major RGBA8 pixels
    pub pixels: Vec<u8>,
}

impl TextureAsset {
    /// Byte count implied by the dimensions.
    #[must_use]
    pub fn expected_len(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * 4
    }

    fn check_len(&self) -> Result<(), String> {
        if self.pixels.len() as u64 == self.expected_len() {
            Ok(())
        } else {
            Err(format!(
                "{}x{} texture needs {} bytes, has {}",
                self.width,
                self.height,
                self.expected_len(),
                self.pixels.len()
            ))
        }
    }
}

impl TypedAsset for TextureAsset {
    const KIND: AssetKind = AssetKind::Texture;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        let width = reader.read()?;
        let height = reader.read()?;
        let filter_byte = reader.read::<u8>()?;
        let filter = TextureFilter::from_u8(filter_byte).ok_or_else(|| {
            AssetError::InvalidBody(format!("unknown texture filter {filter_byte}"))
        })?;

        let texture = Self {
            width,
            height,
            filter,
            pixels: reader.read_sequence()?,
        };
        texture.check_len().map_err(AssetError::InvalidBody)?;
        Ok(texture)
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        self.check_len().map_err(AssetError::InvalidArgument)?;
        writer.write(self.width)?;
        writer.write(self.height)?;
        writer.write(self.filter as u8)?;
        writer.write_sequence(&self.pixels)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{self, ContainerConfig};
    use crate::error::ErrorKind;

    fn checker() -> TextureAsset {
        let pixels = (0..4u8)
            .flat_map(|i| if i % 2 == 0 { [255, 255, 255, 255] } else { [0, 0, 0, 255] })
            .collect();
        TextureAsset {
            width: 2,
            height: 2,
            filter: TextureFilter::Linear,
            pixels,
        }
    }

    #[test]
    fn test_roundtrip() {
        let texture = checker();
        let bytes = texture.to_container_bytes(&ContainerConfig::default()).unwrap();
        let loaded = TextureAsset::from_container_bytes(&bytes).unwrap();
        assert_eq!(loaded, texture);
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let mut texture = checker();
        texture.pixels.pop();
        assert_eq!(
            texture.to_payload().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        // hand-built payload claiming 2x2 with 15 bytes
        let mut writer = ByteWriter::new();
        writer.write(1u8).unwrap();
        writer.write(TextureAsset::VERSION).unwrap();
        writer.write(2u32).unwrap();
        writer.write(2u32).unwrap();
        writer.write(0u8).unwrap();
        writer.write_sequence(&[0u8; 15]).unwrap();
        let bytes = container::compress(
            writer.as_slice(),
            AssetKind::Texture.tag(),
            &ContainerConfig::default(),
        )
        .unwrap();
        assert_eq!(
            TextureAsset::from_container_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidBody
        );
    }
}
