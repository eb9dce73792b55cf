//! # Option Registry
//!
//! Option lists are named enumerations of label -> value pairs, one TOML
//! file per list. The list name is the file stem.
//!
//! ```toml
//! # damage_type.toml
//! type = "int"
//! description = "Kinds of damage"
//!
//! [[values]]
//! label = "fire"
//! value = 1
//!
//! [[values]]
//! label = "ice"
//! value = 2
//! ```
//!
//! Labels keep their authored order. Values need not be unique; reverse
//! lookup returns the first label holding a value.

use std::collections::HashMap;
use std::path::Path;

use hearth_core::{scan_directory, Param, ParamType};
use indexmap::IndexMap;
use serde::Deserialize;
use toml::{Table, Value};

use crate::error::{SchemaError, SchemaResult};
use crate::fields::{deserialize_table, parse_type, value_to_param};

/// Handle to an option list inside an [`OptionRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(u32);

impl OptionId {
    /// Position in the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named enumeration of typed values.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionDefinition {
    name: String,
    description: String,
    value_type: ParamType,
    options: IndexMap<String, Param>,
}

#[derive(Deserialize)]
struct RawOptionList {
    r#type: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    values: Vec<RawOption>,
}

#[derive(Deserialize)]
struct RawOption {
    label: String,
    value: Value,
}

pub(crate) fn read_schema_file(path: &Path) -> SchemaResult<(String, String)> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            SchemaError::IncorrectFormat(format!("{} has no usable file name", path.display()))
        })?
        .to_owned();
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((name, text))
}

pub(crate) fn parse_table(origin: &str, text: &str) -> SchemaResult<Table> {
    text.parse::<Table>().map_err(|e| SchemaError::Parse {
        origin: origin.to_owned(),
        message: e.to_string(),
    })
}

impl OptionDefinition {
    /// Loads an option list; its name is the file stem.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Parse` for invalid TOML, and
    /// `IncorrectFormat` as [`Self::from_table`].
    pub fn create(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let (name, text) = read_schema_file(path)?;
        let definition = Self::from_toml_str(&name, &text)?;
        tracing::debug!(path = %path.display(), name = %name, labels = definition.len(), "loaded option list");
        Ok(definition)
    }

    /// Parses an option list from TOML text.
    ///
    /// # Errors
    ///
    /// `Parse` for invalid TOML, otherwise as [`Self::from_table`].
    pub fn from_toml_str(name: &str, text: &str) -> SchemaResult<Self> {
        Self::from_table(name, &parse_table(name, text)?)
    }

    /// Builds an option list from a parsed table.
    ///
    /// # Errors
    ///
    /// `IncorrectFormat` if `type` is missing, `none` or unknown, if
    /// `values` is not an array of tables, or if any entry lacks a label or
    /// value or holds a value of the wrong type.
    pub fn from_table(name: &str, table: &Table) -> SchemaResult<Self> {
        let raw: RawOptionList = deserialize_table(&format!("option list {name:?}"), table)?;
        let value_type = match raw.r#type.as_deref().map(parse_type).transpose()? {
            None | Some(ParamType::None) => {
                return Err(SchemaError::IncorrectFormat(format!(
                    "option list {name:?} needs a value type"
                )))
            }
            Some(ty) => ty,
        };

        let mut options = IndexMap::with_capacity(raw.values.len());
        for RawOption { label, value } in raw.values {
            let value = value_to_param(value_type, "value", &value)?;
            if options.insert(label.clone(), value).is_some() {
                tracing::warn!(list = name, label = %label, "duplicate option label, later value wins");
            }
        }

        Ok(Self {
            name: name.to_owned(),
            description: raw.description,
            value_type,
            options,
        })
    }

    /// List name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Editor description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Type shared by every value in the list.
    #[must_use]
    pub const fn value_type(&self) -> ParamType {
        self.value_type
    }

    /// Value for `label`.
    #[must_use]
    pub fn get_value(&self, label: &str) -> Option<&Param> {
        self.options.get(label)
    }

    /// First label holding `value`.
    #[must_use]
    pub fn find(&self, value: &Param) -> Option<&str> {
        self.options
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(label, _)| label.as_str())
    }

    /// Label/value pairs in authored order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.options.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// Labels in authored order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the list has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Every option list known to the pipeline, addressed by name or handle.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    definitions: Vec<OptionDefinition>,
    by_name: HashMap<String, OptionId>,
}

impl OptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a list.
    ///
    /// # Errors
    ///
    /// `DuplicateOptionList` if a list with the same name exists.
    pub fn insert(&mut self, definition: OptionDefinition) -> SchemaResult<OptionId> {
        if self.by_name.contains_key(definition.name()) {
            return Err(SchemaError::DuplicateOptionList(definition.name.clone()));
        }
        let id = u32::try_from(self.definitions.len())
            .map(OptionId)
            .map_err(|_| SchemaError::IncorrectFormat("too many option lists".into()))?;
        self.by_name.insert(definition.name.clone(), id);
        self.definitions.push(definition);
        Ok(id)
    }

    /// Loads every `*.<extension>` file under `dir`, in file-name order.
    ///
    /// Returns the number of lists added.
    ///
    /// # Errors
    ///
    /// The first load error, or `DuplicateOptionList`.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>, extension: &str) -> SchemaResult<usize> {
        let dir = dir.as_ref();
        let files = scan_directory(dir, extension).map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for relative in &files {
            self.insert(OptionDefinition::create(dir.join(relative))?)?;
        }

        tracing::info!(dir = %dir.display(), count = files.len(), "loaded option lists");
        Ok(files.len())
    }

    /// List by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionDefinition> {
        self.id_of(name).and_then(|id| self.by_id(id))
    }

    /// Handle for a list name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<OptionId> {
        self.by_name.get(name).copied()
    }

    /// List by handle.
    #[must_use]
    pub fn by_id(&self, id: OptionId) -> Option<&OptionDefinition> {
        self.definitions.get(id.index())
    }

    /// All lists in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDefinition> {
        self.definitions.iter()
    }

    /// Number of lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no lists are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Color;

    const DAMAGE: &str = r#"
type = "int"
description = "Kinds of damage"

[[values]]
label = "fire"
value = 1

[[values]]
label = "ice"
value = 2

[[values]]
label = "frost"
value = 2
"#;

    #[test]
    fn test_parse_and_lookup() {
        let list = OptionDefinition::from_toml_str("damage_type", DAMAGE).unwrap();
        assert_eq!(list.name(), "damage_type");
        assert_eq!(list.value_type(), ParamType::Int);
        assert_eq!(list.description(), "Kinds of damage");
        assert_eq!(list.get_value("fire"), Some(&Param::Int(1)));
        assert_eq!(list.get_value("poison"), None);
        assert_eq!(list.labels().collect::<Vec<_>>(), ["fire", "ice", "frost"]);

        // first label wins on a shared value
        assert_eq!(list.find(&Param::Int(2)), Some("ice"));
        assert_eq!(list.find(&Param::Int(9)), None);
        assert_eq!(list.find(&Param::Byte(1)), None);
    }

    #[test]
    fn test_duplicate_label_overwrites_in_place() {
        let text = "type = \"string\"\n[[values]]\nlabel = \"a\"\nvalue = \"x\"\n[[values]]\nlabel = \"b\"\nvalue = \"y\"\n[[values]]\nlabel = \"a\"\nvalue = \"z\"";
        let list = OptionDefinition::from_toml_str("letters", text).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.labels().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(list.get_value("a"), Some(&Param::String("z".into())));
    }

    #[test]
    fn test_color_values() {
        let text = "type = \"color\"\n[[values]]\nlabel = \"red\"\nvalue = \"#ff0000\"\n[[values]]\nlabel = \"glass\"\nvalue = [0.5, 0.5, 1.0, 0.25]";
        let list = OptionDefinition::from_toml_str("tints", text).unwrap();
        assert_eq!(list.get_value("red"), Some(&Param::Color(Color::rgb(1.0, 0.0, 0.0))));
        assert_eq!(
            list.get_value("glass"),
            Some(&Param::Color(Color::new(0.5, 0.5, 1.0, 0.25)))
        );
    }

    #[test]
    fn test_type_required() {
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "[[values]]\nlabel = \"a\"\nvalue = 1"),
            Err(SchemaError::IncorrectFormat(_))
        ));
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "type = \"none\""),
            Err(SchemaError::IncorrectFormat(_))
        ));
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "type = \"int\"\n[[values]]\nlabel = \"a\"\nvalue = \"one\""),
            Err(SchemaError::IncorrectFormat(_))
        ));
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "type = \"int\"\nvalues = 3"),
            Err(SchemaError::IncorrectFormat(_))
        ));
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "type = \"int\"\n[[values]]\nvalue = 1"),
            Err(SchemaError::IncorrectFormat(_))
        ));
        assert!(matches!(
            OptionDefinition::from_toml_str("x", "type = "),
            Err(SchemaError::Parse { .. })
        ));
    }

    #[test]
    fn test_registry_handles() {
        let mut registry = OptionRegistry::new();
        let id = registry
            .insert(OptionDefinition::from_toml_str("damage_type", DAMAGE).unwrap())
            .unwrap();
        assert_eq!(registry.id_of("damage_type"), Some(id));
        assert_eq!(registry.by_id(id).unwrap().name(), "damage_type");
        assert!(registry.get("missing").is_none());

        let again = OptionDefinition::from_toml_str("damage_type", DAMAGE).unwrap();
        assert!(matches!(
            registry.insert(again),
            Err(SchemaError::DuplicateOptionList(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("damage_type.toml"), DAMAGE).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested/armor.toml"),
            "type = \"byte\"\n[[values]]\nlabel = \"light\"\nvalue = 1",
        )
        .unwrap();

        let mut registry = OptionRegistry::new();
        assert_eq!(registry.load_directory(dir.path(), "toml").unwrap(), 2);
        let names: Vec<_> = registry.iter().map(OptionDefinition::name).collect();
        assert_eq!(names, ["armor", "damage_type"]);
        assert_eq!(
            registry.get("armor").unwrap().get_value("light"),
            Some(&Param::Byte(1))
        );
    }
}
