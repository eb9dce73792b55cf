//! # Actor Class Definitions
//!
//! One TOML file per actor class; the class name is the file stem.
//!
//! ```toml
//! # door.toml
//! extends = "mover"
//! description = "A sliding door"
//! virtual = false
//!
//! [display]
//! model = "models/door.obj"
//! directional = true
//!
//! [inputs.open]
//! description = "Start opening"
//!
//! [outputs.opened]
//! description = "Finished opening"
//!
//! [params.speed]
//! type = "float"
//! default = 2.0
//! ```
//!
//! Parsing is phase one of loading: parents and option lists are only names
//! here. [`ActorClassGraph::resolve`](crate::ActorClassGraph::resolve) turns
//! them into handles once every file is loaded.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use toml::{Table, Value};

use crate::class_graph::ActorClassId;
use crate::error::{SchemaError, SchemaResult};
use crate::fields::deserialize_table;
use crate::options::{parse_table, read_schema_file};
use crate::param_def::{ParamDefinition, RawParam};
use crate::signal::{RenderDefinition, SignalDefinition};

/// An actor schema file as written.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawActor {
    extends: String,
    description: String,
    r#virtual: bool,
    display: RenderDefinition,
    inputs: BTreeMap<String, SignalDefinition>,
    outputs: BTreeMap<String, SignalDefinition>,
    params: BTreeMap<String, RawParam>,
    #[serde(flatten)]
    unknown: BTreeMap<String, Value>,
}

/// Schema of one actor class.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorDefinition {
    /// Class name (file stem)
    pub class_name: String,
    /// Parent class name, empty for a root class
    pub parent_class_name: String,
    /// Parent handle, set by resolution
    pub(crate) parent: Option<ActorClassId>,
    /// Editor description
    pub description: String,
    /// Virtual classes can be extended but not placed
    pub is_virtual: bool,
    /// Display hints
    pub render: RenderDefinition,
    /// Own input slots
    pub inputs: BTreeMap<String, SignalDefinition>,
    /// Own output slots
    pub outputs: BTreeMap<String, SignalDefinition>,
    /// Own parameters
    pub params: BTreeMap<String, ParamDefinition>,
}

impl ActorDefinition {
    /// Creates an empty root class.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            parent_class_name: String::new(),
            parent: None,
            description: String::new(),
            is_virtual: false,
            render: RenderDefinition::default(),
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            params: BTreeMap::new(),
        }
    }

    /// Loads a class; its name is the file stem.
    ///
    /// # Errors
    ///
    /// `Io`, `Parse` or `IncorrectFormat`.
    pub fn create(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let (class_name, text) = read_schema_file(path)?;
        let definition = Self::from_toml_str(&class_name, &text)?;
        tracing::debug!(
            path = %path.display(),
            class = %class_name,
            parent = %definition.parent_class_name,
            params = definition.params.len(),
            "loaded actor class"
        );
        Ok(definition)
    }

    /// Parses a class from TOML text.
    ///
    /// # Errors
    ///
    /// `Parse` for invalid TOML, otherwise as [`Self::from_table`].
    pub fn from_toml_str(class_name: &str, text: &str) -> SchemaResult<Self> {
        Self::from_table(class_name, &parse_table(class_name, text)?)
    }

    /// Builds a class from a parsed table.
    ///
    /// # Errors
    ///
    /// `IncorrectFormat` for mistyped fields or malformed entries.
    pub fn from_table(class_name: &str, table: &Table) -> SchemaResult<Self> {
        let raw: RawActor = deserialize_table(class_name, table)?;
        for key in raw.unknown.keys() {
            tracing::warn!(class = class_name, key = %key, "ignoring unknown actor schema key");
        }

        let params: BTreeMap<String, ParamDefinition> = raw
            .params
            .into_iter()
            .map(|(name, param)| match ParamDefinition::from_raw(param) {
                Ok(definition) => Ok((name, definition)),
                Err(SchemaError::IncorrectFormat(msg)) => Err(SchemaError::IncorrectFormat(
                    format!("{class_name}: params.{name}: {msg}"),
                )),
                Err(other) => Err(other),
            })
            .collect::<SchemaResult<_>>()?;

        Ok(Self {
            class_name: class_name.to_owned(),
            parent_class_name: raw.extends,
            parent: None,
            description: raw.description,
            is_virtual: raw.r#virtual,
            render: raw.display,
            inputs: raw.inputs,
            outputs: raw.outputs,
            params,
        })
    }

    /// Resolved parent handle.
    #[must_use]
    pub const fn parent(&self) -> Option<ActorClassId> {
        self.parent
    }

    /// Returns true if the class extends another.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        !self.parent_class_name.is_empty()
    }
}
