//! # HEARTH Assets
//!
//! Binary asset files for the HEARTH pipeline.
//!
//! ## Layers
//!
//! 1. **Container** - 16-byte header plus one zlib stream, tagged with the
//!    asset kind
//! 2. **Envelope** - version prefix inside the payload, checked before any
//!    field is decoded
//! 3. **Typed assets** - fixed field layouts, one per kind
//!
//! ## Example
//!
//! ```rust,no_run
//! use hearth_assets::{GameConfig, TypedAsset};
//!
//! let config = GameConfig {
//!     title: "Hearth".into(),
//!     start_level: "entry".into(),
//!     window_scale: 2,
//! };
//! config.save_as_asset("game.config")?;
//!
//! let loaded = GameConfig::create_from_asset("game.config")?;
//! assert_eq!(loaded, config);
//! # Ok::<(), hearth_assets::AssetError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod container;
pub mod envelope;
pub mod error;
pub mod types;

pub use container::{compress, decompress, load_from_file, save_to_file, ContainerConfig, ContainerHeader};
pub use envelope::{AssetEnvelope, AssetKind, TypedAsset, CONTAINER_FORMAT_VERSION};
pub use error::{AssetError, AssetResult, ErrorKind};
pub use types::{
    DataAsset, FontAsset, GameConfig, Glyph, LevelAsset, ShaderAsset, ShaderStage, ShaderStageKind,
    SoundAsset, TextureAsset, TextureFilter,
};
