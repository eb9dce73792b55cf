//! # Pipeline Error Types

use std::path::PathBuf;

use hearth_assets::AssetError;
use hearth_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while starting or running a pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Asset container or record failure.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Schema load or resolution failure.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The config file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigIo {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid.
    #[error("invalid pipeline config: {0}")]
    Config(String),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
