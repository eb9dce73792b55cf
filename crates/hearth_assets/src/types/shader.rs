//! Pre-compiled shader programs.

use hearth_core::{ByteReader, ByteWriter};

use super::read_count;
use crate::envelope::{AssetKind, TypedAsset};
use crate::error::{AssetError, AssetResult};

/// Pipeline stage of a shader module.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStageKind {
    /// Vertex stage
    Vertex = 0,
    /// Fragment stage
    Fragment = 1,
    /// Compute stage
    Compute = 2,
}

impl ShaderStageKind {
    /// Decodes a stage byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Vertex),
            1 => Some(Self::Fragment),
            2 => Some(Self::Compute),
            _ => None,
        }
    }
}

/// One compiled stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderStage {
    /// Which stage this is
    pub stage: ShaderStageKind,
    /// Entry point function name
    pub entry_point: String,
    /// Compiled IR words
    pub words: Vec<u32>,
}

/// A shader program made of one or more stages.
///
/// Layout: stage count, then per stage: stage `u8`, entry point string,
/// IR words (counted). Each stage kind appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderAsset {
    /// Compiled stages
    pub stages: Vec<ShaderStage>,
}

impl ShaderAsset {
    fn check_unique(&self) -> Result<(), String> {
        for (i, stage) in self.stages.iter().enumerate() {
            if self.stages[..i].iter().any(|s| s.stage == stage.stage) {
                return Err(format!("duplicate {:?} stage", stage.stage));
            }
        }
        Ok(())
    }
}

impl TypedAsset for ShaderAsset {
    const KIND: AssetKind = AssetKind::Shader;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        // stage byte, empty entry point, zero word count
        let count = read_count(reader, 1 + 8 + 8)?;
        let mut stages = Vec::with_capacity(count);
        for _ in 0..count {
            let stage_byte = reader.read::<u8>()?;
            let stage = ShaderStageKind::from_u8(stage_byte).ok_or_else(|| {
                AssetError::InvalidBody(format!("unknown shader stage {stage_byte}"))
            })?;
            stages.push(ShaderStage {
                stage,
                entry_point: reader.read_string()?,
                words: reader.read_sequence()?,
            });
        }

        let shader = Self { stages };
        shader.check_unique().map_err(AssetError::InvalidBody)?;
        Ok(shader)
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        self.check_unique().map_err(AssetError::InvalidArgument)?;
        writer.write_usize(self.stages.len())?;
        for stage in &self.stages {
            writer.write(stage.stage as u8)?;
            writer.write_string(&stage.entry_point)?;
            writer.write_sequence(&stage.words)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerConfig;
    use crate::error::ErrorKind;

    #[test]
    fn test_roundtrip() {
        let shader = ShaderAsset {
            stages: vec![
                ShaderStage {
                    stage: ShaderStageKind::Vertex,
                    entry_point: "vs_main".into(),
                    words: vec![0x0723_0203, 1, 2, 3],
                },
                ShaderStage {
                    stage: ShaderStageKind::Fragment,
                    entry_point: "fs_main".into(),
                    words: vec![0x0723_0203, 9],
                },
            ],
        };
        let bytes = shader.to_container_bytes(&ContainerConfig::default()).unwrap();
        let loaded = ShaderAsset::from_container_bytes(&bytes).unwrap();
        assert_eq!(loaded, shader);
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let stage = ShaderStage {
            stage: ShaderStageKind::Compute,
            entry_point: "main".into(),
            words: Vec::new(),
        };
        let shader = ShaderAsset {
            stages: vec![stage.clone(), stage],
        };
        assert_eq!(
            shader.to_payload().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
