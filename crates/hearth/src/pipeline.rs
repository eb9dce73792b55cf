//! # Pipeline
//!
//! Startup and the level round-trip.
//!
//! ```text
//! PipelineConfig ──> Pipeline::startup ──> Arc<SchemaRegistry>
//!                                              │
//! level file ──> load_level ──> LevelAsset ──> validate_level ──> Vec<LevelIssue>
//! ```
//!
//! The registry is read-only after startup, so the `Arc` can be shared with
//! worker threads as is.

use std::path::Path;
use std::sync::Arc;

use hearth_assets::{LevelAsset, TypedAsset};
use hearth_schema::SchemaRegistry;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::validate::{self, LevelIssue};

/// A started pipeline: config plus the resolved schema registry.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    schema: Arc<SchemaRegistry>,
}

impl Pipeline {
    /// Validates `config`, then loads and resolves the schema trees.
    ///
    /// # Errors
    ///
    /// Config errors, or any schema load or resolution error. Hosts should
    /// treat both as fatal.
    pub fn startup(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let schema = SchemaRegistry::load(&config.schema)?;
        tracing::info!(
            schema_root = %config.schema.root.display(),
            compression_level = config.container.compression_level,
            "pipeline started"
        );
        Ok(Self {
            config,
            schema: Arc::new(schema),
        })
    }

    /// Builds a pipeline around an already resolved registry.
    ///
    /// # Errors
    ///
    /// Config errors.
    pub fn with_schema(config: PipelineConfig, schema: Arc<SchemaRegistry>) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config, schema })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Shared schema registry.
    #[must_use]
    pub fn schema(&self) -> &Arc<SchemaRegistry> {
        &self.schema
    }

    /// Loads a level file.
    ///
    /// # Errors
    ///
    /// Any asset error; a file of another kind is `IncorrectFormat`.
    pub fn load_level(&self, path: impl AsRef<Path>) -> PipelineResult<LevelAsset> {
        Ok(LevelAsset::create_from_asset(path)?)
    }

    /// Saves a level with the configured container settings.
    ///
    /// # Errors
    ///
    /// Any asset error, including I/O failures.
    pub fn save_level(&self, path: impl AsRef<Path>, level: &LevelAsset) -> PipelineResult<()> {
        level.save_as_asset_with(path, &self.config.container)?;
        Ok(())
    }

    /// Lists every problem in `level`. Each one is also logged at warn.
    #[must_use]
    pub fn validate_level(&self, level: &LevelAsset) -> Vec<LevelIssue> {
        validate::validate_level(&self.schema, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_schema::{ActorClassGraph, ActorDefinition, OptionRegistry};

    fn pipeline() -> Pipeline {
        let mut classes = ActorClassGraph::new();
        classes
            .insert(ActorDefinition::from_toml_str("lamp", "[params.radius]\ntype = \"float\"\ndefault = 4.0").unwrap())
            .unwrap();
        let schema = SchemaRegistry::from_parts(OptionRegistry::new(), classes).unwrap();
        Pipeline::with_schema(PipelineConfig::default(), Arc::new(schema)).unwrap()
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();

        let pipeline = pipeline();
        let schema = Arc::clone(pipeline.schema());
        let actor = std::thread::spawn(move || schema.instantiate("lamp", "lamp_1").unwrap())
            .join()
            .unwrap();
        assert_eq!(actor.params["radius"], hearth_core::Param::Float(4.0));
    }

    #[test]
    fn test_save_and_load_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.level");
        let pipeline = pipeline();

        let level = LevelAsset {
            name: "entry".into(),
            actors: vec![pipeline.schema().instantiate("lamp", "lamp_1").unwrap()],
            ..LevelAsset::default()
        };
        pipeline.save_level(&path, &level).unwrap();
        assert_eq!(pipeline.load_level(&path).unwrap(), level);
    }
}
