//! Where schema files live on disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Schema directory layout (loaded from TOML by the host).
///
/// ```toml
/// root = "data/schemas"
/// options_dir = "options"
/// actors_dir = "actors"
/// extension = "toml"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Directory holding both schema trees
    pub root: PathBuf,
    /// Option lists, relative to `root`
    pub options_dir: PathBuf,
    /// Actor classes, relative to `root`
    pub actors_dir: PathBuf,
    /// File extension of schema files, without the dot
    pub extension: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/schemas"),
            options_dir: PathBuf::from("options"),
            actors_dir: PathBuf::from("actors"),
            extension: "toml".into(),
        }
    }
}

impl SchemaConfig {
    /// Layout with the default sub-directories under `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Full path of the option list directory.
    #[must_use]
    pub fn options_path(&self) -> PathBuf {
        self.root.join(&self.options_dir)
    }

    /// Full path of the actor class directory.
    #[must_use]
    pub fn actors_path(&self) -> PathBuf {
        self.root.join(&self.actors_dir)
    }
}
