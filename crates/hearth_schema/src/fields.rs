//! Shared pieces of schema deserialization.
//!
//! Schema files are deserialized into serde structs; the values whose TOML
//! type depends on a sibling `type` field stay as `toml::Value` and are
//! converted here once that type is known.

use hearth_core::{Color, Param, ParamType};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use toml::{Table, Value};

use crate::error::{SchemaError, SchemaResult};

/// Deserializes a parsed table into `T`, prefixing errors with `origin`.
pub(crate) fn deserialize_table<T: DeserializeOwned>(origin: &str, table: &Table) -> SchemaResult<T> {
    T::deserialize(Value::Table(table.clone()))
        .map_err(|e| SchemaError::IncorrectFormat(format!("{origin}: {}", e.message())))
}

/// Parses a param type name.
pub(crate) fn parse_type(name: &str) -> SchemaResult<ParamType> {
    ParamType::from_name(name)
        .ok_or_else(|| SchemaError::IncorrectFormat(format!("unknown type {name:?}")))
}

/// `deserialize_with` adapter for a `type` field.
pub(crate) fn param_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ParamType, D::Error> {
    let name = String::deserialize(deserializer)?;
    parse_type(&name).map_err(D::Error::custom)
}

/// `deserialize_with` adapter for a color field.
pub(crate) fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_color("color", &value).map_err(D::Error::custom)
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> SchemaError {
    SchemaError::IncorrectFormat(format!(
        "`{key}` must be {expected}, found {}",
        found.type_str()
    ))
}

/// Converts a TOML value into a param of type `ty`.
///
/// Integers are range-checked for `byte` and `int`; floats accept integer
/// literals; colors accept `[r, g, b]`, `[r, g, b, a]` or `"#rrggbb[aa]"`.
pub(crate) fn value_to_param(ty: ParamType, key: &str, value: &Value) -> SchemaResult<Param> {
    match ty {
        ParamType::Byte => Ok(Param::Byte(to_byte(key, value)?)),
        ParamType::Int => Ok(Param::Int(to_int(key, value)?)),
        ParamType::Float => Ok(Param::Float(to_float(key, value)?)),
        ParamType::Bool => Ok(Param::Bool(to_bool(key, value)?)),
        ParamType::String => Ok(Param::String(to_str(key, value)?.to_owned())),
        ParamType::Color => Ok(Param::Color(to_color(key, value)?)),
        ParamType::None => Err(SchemaError::IncorrectFormat(format!(
            "`{key}` cannot hold a value of type none"
        ))),
    }
}

pub(crate) fn to_bool(key: &str, value: &Value) -> SchemaResult<bool> {
    value.as_bool().ok_or_else(|| wrong_type(key, "a bool", value))
}

pub(crate) fn to_str<'a>(key: &str, value: &'a Value) -> SchemaResult<&'a str> {
    value.as_str().ok_or_else(|| wrong_type(key, "a string", value))
}

pub(crate) fn to_byte(key: &str, value: &Value) -> SchemaResult<u8> {
    match value {
        Value::Integer(i) => u8::try_from(*i).map_err(|_| {
            SchemaError::IncorrectFormat(format!("`{key}` = {i} is outside 0..=255"))
        }),
        other => Err(wrong_type(key, "an integer", other)),
    }
}

pub(crate) fn to_int(key: &str, value: &Value) -> SchemaResult<i32> {
    match value {
        Value::Integer(i) => i32::try_from(*i).map_err(|_| {
            SchemaError::IncorrectFormat(format!("`{key}` = {i} does not fit in 32 bits"))
        }),
        other => Err(wrong_type(key, "an integer", other)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn to_float(key: &str, value: &Value) -> SchemaResult<f32> {
    let wide = match value {
        Value::Float(f) => *f,
        Value::Integer(i) => *i as f64,
        other => return Err(wrong_type(key, "a number", other)),
    };
    if !wide.is_finite() || wide.abs() > f64::from(f32::MAX) {
        return Err(SchemaError::IncorrectFormat(format!(
            "`{key}` = {wide} is not a finite 32-bit float"
        )));
    }
    Ok(wide as f32)
}

pub(crate) fn to_color(key: &str, value: &Value) -> SchemaResult<Color> {
    match value {
        Value::String(hex) => Color::from_hex(hex).ok_or_else(|| {
            SchemaError::IncorrectFormat(format!("`{key}` = {hex:?} is not #rrggbb or #rrggbbaa"))
        }),
        Value::Array(items) if items.len() == 3 || items.len() == 4 => {
            let mut channels = [1.0f32; 4];
            for (channel, item) in channels.iter_mut().zip(items) {
                *channel = to_float(key, item)?;
            }
            let [r, g, b, a] = channels;
            Ok(Color::new(r, g, b, a))
        }
        other => Err(wrong_type(key, "a color array or hex string", other)),
    }
}
