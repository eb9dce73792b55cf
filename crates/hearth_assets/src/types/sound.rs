//! Encoded audio clips.

use hearth_core::{ByteReader, ByteWriter};

use crate::envelope::{AssetKind, TypedAsset};
use crate::error::{AssetError, AssetResult};

/// An audio clip stored in its encoded form.
///
/// Layout: sample rate `u32`, channels `u8`, looping `bool`, then the
/// encoded sample bytes as a counted buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundAsset {
    /// Samples per second
    pub sample_rate: u32,
    /// Interleaved channel count (non-zero)
    pub channels: u8,
    /// Whether playback wraps around
    pub looping: bool,
    /// Encoded sample data
    pub samples: Vec<u8>,
}

impl Default for SoundAsset {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            looping: false,
            samples: Vec::new(),
        }
    }
}

impl TypedAsset for SoundAsset {
    const KIND: AssetKind = AssetKind::Sound;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        let sample_rate = reader.read()?;
        let channels = reader.read::<u8>()?;
        if channels == 0 {
            return Err(AssetError::InvalidBody("sound has zero channels".into()));
        }
        Ok(Self {
            sample_rate,
            channels,
            looping: reader.read_bool()?,
            samples: reader.read_sequence()?,
        })
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        if self.channels == 0 {
            return Err(AssetError::InvalidArgument("sound has zero channels".into()));
        }
        writer.write(self.sample_rate)?;
        writer.write(self.channels)?;
        writer.write_bool(self.looping)?;
        writer.write_sequence(&self.samples)?;
        Ok(())
    }
}
