//! Top-level game settings.

use hearth_core::{ByteReader, ByteWriter};

use crate::envelope::{AssetKind, TypedAsset};
use crate::error::AssetResult;

/// Title, entry level and window scale.
///
/// Layout: title string, start level string, window scale (`usize`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Window title
    pub title: String,
    /// Level loaded at startup
    pub start_level: String,
    /// Integer window scale factor
    pub window_scale: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: String::from("Untitled"),
            start_level: String::new(),
            window_scale: 1,
        }
    }
}

impl TypedAsset for GameConfig {
    const KIND: AssetKind = AssetKind::Config;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        Ok(Self {
            title: reader.read_string()?,
            start_level: reader.read_string()?,
            window_scale: reader.read_usize()?,
        })
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        writer.write_string(&self.title)?;
        writer.write_string(&self.start_level)?;
        writer.write_usize(self.window_scale)?;
        Ok(())
    }
}
