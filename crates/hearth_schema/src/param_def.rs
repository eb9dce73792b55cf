//! # Parameter Definitions
//!
//! A `[params.<name>]` table in an actor schema describes one parameter:
//! its type, bounds and default.
//!
//! ```toml
//! [params.speed]
//! type = "float"
//! description = "Units per second"
//! default = 2.5
//! minimum = 0.0
//! maximum = 10.0
//! step = 0.5
//!
//! [params.damage]
//! type = "int"
//! options = "damage_type"
//! default = "fire"
//! ```
//!
//! A table with `options` always becomes an option parameter, whatever its
//! declared `type`; its default is a label looked up in the named list once
//! the class graph is resolved.
//!
//! ## Fallbacks
//!
//! | type   | minimum      | maximum      | default | other            |
//! |--------|--------------|--------------|---------|------------------|
//! | byte   | 0            | 255          | 0       |                  |
//! | int    | `i32::MIN`   | `i32::MAX`   | 0       |                  |
//! | float  | `f32::MIN`   | `f32::MAX`   | 0.0     | step 0.1         |
//! | bool   |              |              | false   |                  |
//! | string |              |              | ""      | hint `none`      |
//! | color  |              |              | white   | alpha `false`    |
//!
//! A fallback default outside the declared range is clamped into it.

use std::fmt;

use hearth_core::{Color, Param, ParamType};
use serde::Deserialize;
use toml::{Table, Value};

use crate::error::{SchemaError, SchemaResult};
use crate::fields::{deserialize_table, parse_type, to_bool, to_byte, to_color, to_float, to_int, to_str};
use crate::options::{OptionId, OptionRegistry};

/// What a string parameter refers to, for editor pickers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringHint {
    /// Free text
    #[default]
    None,
    /// Texture asset path
    Texture,
    /// Model asset path
    Model,
    /// Sound asset path
    Sound,
    /// Name of another actor in the level
    Actor,
    /// Material name
    Material,
}

impl StringHint {
    /// Schema name of this hint.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Texture => "texture",
            Self::Model => "model",
            Self::Sound => "sound",
            Self::Actor => "actor",
            Self::Material => "material",
        }
    }
}

impl fmt::Display for StringHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant-specific part of a [`ParamDefinition`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParamKind {
    /// Unsigned byte in `min..=max`
    Byte {
        /// Lower bound
        min: u8,
        /// Upper bound
        max: u8,
        /// Default value
        default: u8,
    },
    /// Signed integer in `min..=max`
    Int {
        /// Lower bound
        min: i32,
        /// Upper bound
        max: i32,
        /// Default value
        default: i32,
    },
    /// Float in `min..=max`
    Float {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
        /// Default value
        default: f32,
        /// Editor increment
        step: f32,
    },
    /// Boolean
    Bool {
        /// Default value
        default: bool,
    },
    /// String with an editor hint
    String {
        /// Default value
        default: String,
        /// What the string names
        hint: StringHint,
    },
    /// Color
    Color {
        /// Default value
        default: Color,
        /// Whether editors expose the alpha channel
        alpha: bool,
    },
    /// One label out of a named option list
    Option {
        /// Option list name
        list_name: String,
        /// Handle into the option registry, set by resolution
        resolved: Option<OptionId>,
        /// Default label (empty = first label of the list)
        default_label: String,
    },
}

/// One named parameter of an actor class.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDefinition {
    /// Value type; for option params, the list's value type once resolved
    pub param_type: ParamType,
    /// Editor description
    pub description: String,
    /// Variant data
    pub kind: ParamKind,
}

/// A `[params.<name>]` table as written.
///
/// `default`, `minimum`, `maximum` and `step` stay untyped until `type` (or
/// `options`) says how to read them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawParam {
    r#type: Option<String>,
    description: String,
    default: Option<Value>,
    minimum: Option<Value>,
    maximum: Option<Value>,
    step: Option<Value>,
    options: Option<String>,
    hint: StringHint,
    alpha: bool,
}

fn optional<T>(
    key: &str,
    value: Option<&Value>,
    convert: impl Fn(&str, &Value) -> SchemaResult<T>,
) -> SchemaResult<Option<T>> {
    value.map(|value| convert(key, value)).transpose()
}

fn to_string(key: &str, value: &Value) -> SchemaResult<String> {
    to_str(key, value).map(str::to_owned)
}

fn check_range<T: PartialOrd + fmt::Display>(min: T, max: T, default: T) -> SchemaResult<()> {
    if min > max {
        return Err(SchemaError::IncorrectFormat(format!(
            "minimum {min} is greater than maximum {max}"
        )));
    }
    if default < min || default > max {
        return Err(SchemaError::IncorrectFormat(format!(
            "default {default} is outside {min}..={max}"
        )));
    }
    Ok(())
}

impl ParamDefinition {
    /// Parses a `[params.<name>]` table.
    ///
    /// # Errors
    ///
    /// Returns `IncorrectFormat` for a missing or unknown `type`, a field of
    /// the wrong TOML type, an out-of-range number, an unknown hint or an
    /// inverted range.
    pub fn from_schema(table: &Table) -> SchemaResult<Self> {
        Self::from_raw(deserialize_table("param", table)?)
    }

    pub(crate) fn from_raw(raw: RawParam) -> SchemaResult<Self> {
        let RawParam {
            r#type,
            description,
            default,
            minimum,
            maximum,
            step,
            options,
            hint,
            alpha,
        } = raw;
        let default = default.as_ref();

        // `type` is advisory here; resolution replaces it with the list's type
        if let Some(list_name) = options {
            let default_label = optional("default", default, to_string)?.unwrap_or_default();
            return Ok(Self {
                param_type: r#type
                    .as_deref()
                    .and_then(ParamType::from_name)
                    .unwrap_or(ParamType::None),
                description,
                kind: ParamKind::Option {
                    list_name,
                    resolved: None,
                    default_label,
                },
            });
        }

        let param_type = parse_type(
            r#type
                .as_deref()
                .ok_or_else(|| SchemaError::IncorrectFormat("param is missing `type`".into()))?,
        )?;
        let (minimum, maximum) = (minimum.as_ref(), maximum.as_ref());

        let kind = match param_type {
            ParamType::Byte => {
                let min = optional("minimum", minimum, to_byte)?.unwrap_or(u8::MIN);
                let max = optional("maximum", maximum, to_byte)?.unwrap_or(u8::MAX);
                let default = optional("default", default, to_byte)?.unwrap_or(0u8.clamp(min, max.max(min)));
                check_range(min, max, default)?;
                ParamKind::Byte { min, max, default }
            }
            ParamType::Int => {
                let min = optional("minimum", minimum, to_int)?.unwrap_or(i32::MIN);
                let max = optional("maximum", maximum, to_int)?.unwrap_or(i32::MAX);
                let default = optional("default", default, to_int)?.unwrap_or(0i32.clamp(min, max.max(min)));
                check_range(min, max, default)?;
                ParamKind::Int { min, max, default }
            }
            ParamType::Float => {
                let min = optional("minimum", minimum, to_float)?.unwrap_or(f32::MIN);
                let max = optional("maximum", maximum, to_float)?.unwrap_or(f32::MAX);
                let default = optional("default", default, to_float)?.unwrap_or(0.0f32.clamp(min, max.max(min)));
                let step = optional("step", step.as_ref(), to_float)?.unwrap_or(0.1);
                check_range(min, max, default)?;
                if step <= 0.0 {
                    return Err(SchemaError::IncorrectFormat(format!(
                        "step {step} must be positive"
                    )));
                }
                ParamKind::Float {
                    min,
                    max,
                    default,
                    step,
                }
            }
            ParamType::Bool => ParamKind::Bool {
                default: optional("default", default, to_bool)?.unwrap_or(false),
            },
            ParamType::String => ParamKind::String {
                default: optional("default", default, to_string)?.unwrap_or_default(),
                hint,
            },
            ParamType::Color => ParamKind::Color {
                default: optional("default", default, to_color)?.unwrap_or(Color::WHITE),
                alpha,
            },
            ParamType::None => {
                return Err(SchemaError::IncorrectFormat(
                    "param type none carries no value".into(),
                ))
            }
        };

        Ok(Self {
            param_type,
            description,
            kind,
        })
    }

    /// Returns true for option parameters.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self.kind, ParamKind::Option { .. })
    }

    /// Materializes the default value.
    ///
    /// Option parameters map their default label through the resolved list;
    /// an empty label picks the list's first entry.
    ///
    /// # Errors
    ///
    /// `Unresolved` for an option parameter that has not been resolved,
    /// `UnknownOptionLabel` if the label is not in the list.
    pub fn default_param(&self, options: &OptionRegistry) -> SchemaResult<Param> {
        Ok(match &self.kind {
            ParamKind::Byte { default, .. } => Param::Byte(*default),
            ParamKind::Int { default, .. } => Param::Int(*default),
            ParamKind::Float { default, .. } => Param::Float(*default),
            ParamKind::Bool { default } => Param::Bool(*default),
            ParamKind::String { default, .. } => Param::String(default.clone()),
            ParamKind::Color { default, .. } => Param::Color(*default),
            ParamKind::Option {
                list_name,
                resolved,
                default_label,
            } => {
                let list = resolved
                    .and_then(|id| options.by_id(id))
                    .ok_or(SchemaError::Unresolved)?;
                if default_label.is_empty() {
                    list.options().next().map_or(Param::None, |(_, value)| value.clone())
                } else {
                    list.get_value(default_label)
                        .cloned()
                        .ok_or_else(|| SchemaError::UnknownOptionLabel {
                            list: list_name.clone(),
                            label: default_label.clone(),
                        })?
                }
            }
        })
    }

    /// Returns true if `value` has the right type and lies within bounds.
    ///
    /// Option parameters accept exactly the values of their list; an
    /// unresolved option parameter accepts nothing.
    #[must_use]
    pub fn accepts(&self, value: &Param, options: &OptionRegistry) -> bool {
        match (&self.kind, value) {
            (ParamKind::Byte { min, max, .. }, Param::Byte(v)) => (min..=max).contains(&v),
            (ParamKind::Int { min, max, .. }, Param::Int(v)) => (min..=max).contains(&v),
            (ParamKind::Float { min, max, .. }, Param::Float(v)) => {
                v.is_finite() && (min..=max).contains(&v)
            }
            (ParamKind::Bool { .. }, Param::Bool(_))
            | (ParamKind::String { .. }, Param::String(_))
            | (ParamKind::Color { .. }, Param::Color(_)) => true,
            (ParamKind::Option { resolved, .. }, _) => resolved
                .and_then(|id| options.by_id(id))
                .is_some_and(|list| list.find(value).is_some()),
            _ => false,
        }
    }

    /// Clamps a numeric value into bounds.
    ///
    /// Values of another type, and non-numeric kinds, are returned as is.
    #[must_use]
    pub fn clamp(&self, value: Param) -> Param {
        match (&self.kind, value) {
            (ParamKind::Byte { min, max, .. }, Param::Byte(v)) => Param::Byte(v.clamp(*min, *max)),
            (ParamKind::Int { min, max, .. }, Param::Int(v)) => Param::Int(v.clamp(*min, *max)),
            (ParamKind::Float { min, max, default, .. }, Param::Float(v)) => {
                if v.is_nan() {
                    Param::Float(*default)
                } else {
                    Param::Float(v.clamp(*min, *max))
                }
            }
            (ParamKind::Color { alpha: false, .. }, Param::Color(c)) => {
                Param::Color(Color::new(c.r, c.g, c.b, 1.0))
            }
            (_, other) => other,
        }
    }
}
