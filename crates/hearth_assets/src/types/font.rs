//! Bitmap fonts: an RGBA atlas plus a glyph table.

use bytemuck::{Pod, Zeroable};
use hearth_core::{ByteReader, ByteWriter};

use crate::envelope::{AssetKind, TypedAsset};
use crate::error::{AssetError, AssetResult};

/// Placement of one character in the atlas.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Glyph {
    /// Unicode scalar value
    pub codepoint: u32,
    /// Atlas x in pixels
    pub x: u16,
    /// Atlas y in pixels
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
    /// Horizontal draw offset
    pub x_offset: i16,
    /// Vertical draw offset
    pub y_offset: i16,
    /// Pen advance after drawing
    pub advance: f32,
}

/// A bitmap font.
///
/// Layout: pixel size `f32`, line height `f32`, atlas width `u32`, atlas
/// height `u32`, atlas RGBA bytes (counted), glyph table (counted).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontAsset {
    /// Nominal pixel size
    pub pixel_size: f32,
    /// Distance between baselines
    pub line_height: f32,
    /// Atlas width in pixels
    pub atlas_width: u32,
    /// Atlas height in pixels
    pub atlas_height: u32,
    /// Atlas RGBA8 pixels
    pub atlas: Vec<u8>,
    /// Glyph table, sorted by codepoint
    pub glyphs: Vec<Glyph>,
}

impl FontAsset {
    /// Finds the glyph for `ch` by binary search.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        let codepoint = u32::from(ch);
        self.glyphs
            .binary_search_by_key(&codepoint, |g| g.codepoint)
            .ok()
            .map(|i| &self.glyphs[i])
    }

    fn check(&self) -> Result<(), String> {
        let expected = u64::from(self.atlas_width) * u64::from(self.atlas_height) * 4;
        if self.atlas.len() as u64 != expected {
            return Err(format!(
                "{}x{} atlas needs {expected} bytes, has {}",
                self.atlas_width,
                self.atlas_height,
                self.atlas.len()
            ));
        }
        if self.glyphs.windows(2).any(|w| w[0].codepoint >= w[1].codepoint) {
            return Err("glyph table is not sorted by codepoint".into());
        }
        Ok(())
    }
}

impl TypedAsset for FontAsset {
    const KIND: AssetKind = AssetKind::Font;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        let font = Self {
            pixel_size: reader.read()?,
            line_height: reader.read()?,
            atlas_width: reader.read()?,
            atlas_height: reader.read()?,
            atlas: reader.read_sequence()?,
            glyphs: reader.read_sequence()?,
        };
        font.check().map_err(AssetError::InvalidBody)?;
        Ok(font)
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        self.check().map_err(AssetError::InvalidArgument)?;
        writer.write(self.pixel_size)?;
        writer.write(self.line_height)?;
        writer.write(self.atlas_width)?;
        writer.write(self.atlas_height)?;
        writer.write_sequence(&self.atlas)?;
        writer.write_sequence(&self.glyphs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerConfig;
    use crate::error::ErrorKind;

    fn small_font() -> FontAsset {
        let glyph = |ch: char, x: u16| Glyph {
            codepoint: u32::from(ch),
            x,
            y: 0,
            w: 4,
            h: 6,
            x_offset: 0,
            y_offset: -6,
            advance: 5.0,
        };
        FontAsset {
            pixel_size: 6.0,
            line_height: 8.0,
            atlas_width: 8,
            atlas_height: 6,
            atlas: vec![255; 8 * 6 * 4],
            glyphs: vec![glyph('A', 0), glyph('B', 4)],
        }
    }

    #[test]
    fn test_glyph_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<Glyph>(), 20);
    }

    #[test]
    fn test_roundtrip_and_lookup() {
        let font = small_font();
        let bytes = font.to_container_bytes(&ContainerConfig::default()).unwrap();
        let loaded = FontAsset::from_container_bytes(&bytes).unwrap();
        assert_eq!(loaded, font);
        assert_eq!(loaded.glyph('B').unwrap().x, 4);
        assert!(loaded.glyph('C').is_none());
    }

    #[test]
    fn test_unsorted_glyphs_rejected() {
        let mut font = small_font();
        font.glyphs.reverse();
        assert_eq!(
            font.to_payload().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
