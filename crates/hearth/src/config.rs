//! Pipeline configuration.
//!
//! ```toml
//! [container]
//! compression_level = 9
//! chunk_size = 65536
//!
//! [schema]
//! root = "data/schemas"
//! ```
//!
//! Every field is optional.

use std::path::Path;

use hearth_assets::ContainerConfig;
use hearth_schema::SchemaConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Everything a pipeline needs at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Settings used when saving assets
    pub container: ContainerConfig,
    /// Where the schema trees live
    pub schema: SchemaConfig,
}

impl PipelineConfig {
    /// Parses and validates a config.
    ///
    /// # Errors
    ///
    /// `Config` for invalid TOML or unknown field types, `Asset` with
    /// `InvalidArgument` for out-of-range container settings.
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// `ConfigIo` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded pipeline config");
        Ok(config)
    }

    /// Checks every field is in range.
    ///
    /// # Errors
    ///
    /// `Asset` with `InvalidArgument`.
    pub fn validate(&self) -> PipelineResult<()> {
        self.container.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_assets::ErrorKind;
    use std::path::PathBuf;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_sections() {
        let config = PipelineConfig::from_toml_str(
            "[container]\ncompression_level = 9\n[schema]\nroot = \"content/schemas\"",
        )
        .unwrap();
        assert_eq!(config.container.compression_level, 9);
        assert_eq!(config.container.chunk_size, ContainerConfig::default().chunk_size);
        assert_eq!(config.schema.root, PathBuf::from("content/schemas"));
    }

    #[test]
    fn test_rejects_bad_values() {
        match PipelineConfig::from_toml_str("[container]\ncompression_level = 12") {
            Err(PipelineError::Asset(e)) => assert_eq!(e.kind(), ErrorKind::InvalidArgument),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            PipelineConfig::from_toml_str("[container]\ncompression_level = \"max\""),
            Err(PipelineError::Config(_))
        ));
        assert!(matches!(
            PipelineConfig::load("/definitely/not/here.toml"),
            Err(PipelineError::ConfigIo { .. })
        ));
    }
}
