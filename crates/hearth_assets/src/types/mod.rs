//! Concrete asset records, one per [`AssetKind`](crate::envelope::AssetKind).

pub mod data;
pub mod font;
pub mod game_config;
pub mod level;
pub mod shader;
pub mod sound;
pub mod texture;

pub use data::DataAsset;
pub use font::{FontAsset, Glyph};
pub use game_config::GameConfig;
pub use level::LevelAsset;
pub use shader::{ShaderAsset, ShaderStage, ShaderStageKind};
pub use sound::SoundAsset;
pub use texture::{TextureAsset, TextureFilter};

use hearth_core::ByteReader;

use crate::error::{AssetError, AssetResult};

/// Reads a record count and rejects counts that cannot fit in what is left.
///
/// Every record takes at least `min_record_size` bytes, so a count larger
/// than `remaining / min_record_size` is corrupt.
pub(crate) fn read_count(reader: &mut ByteReader<'_>, min_record_size: usize) -> AssetResult<usize> {
    let count = reader.read_usize()?;
    if count > reader.remaining() / min_record_size.max(1) {
        return Err(AssetError::InvalidBody(format!(
            "count {count} exceeds the {} bytes left",
            reader.remaining()
        )));
    }
    Ok(count)
}
