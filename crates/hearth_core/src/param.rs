//! # Tagged Parameter Value
//!
//! A [`Param`] is a single typed value attached to an actor, a data record or
//! an option list entry. The variant *is* the type tag, so the payload and
//! the discriminant can never disagree.
//!
//! ## Wire layout
//!
//! ```text
//! [u8 tag][payload]
//!   0 Byte   u8
//!   1 Int    i32
//!   2 Float  f32
//!   3 Bool   u8 (0 / 1)
//!   4 String u64 length (incl. NUL), bytes, NUL
//!   5 Color  4 x f32
//!   6 None   (nothing)
//! ```

use std::fmt;

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{CursorError, CursorResult};
use crate::math::Color;

/// Discriminant of a [`Param`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamType {
    /// Unsigned 8-bit integer
    Byte = 0,
    /// Signed 32-bit integer
    Int = 1,
    /// 32-bit float
    Float = 2,
    /// Boolean
    Bool = 3,
    /// UTF-8 string
    String = 4,
    /// RGBA color
    Color = 5,
    /// No value
    None = 6,
}

impl ParamType {
    /// Every type, in tag order.
    pub const ALL: [Self; 7] = [
        Self::Byte,
        Self::Int,
        Self::Float,
        Self::Bool,
        Self::String,
        Self::Color,
        Self::None,
    ];

    /// Decodes a wire tag.
    #[must_use]
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Byte),
            1 => Some(Self::Int),
            2 => Some(Self::Float),
            3 => Some(Self::Bool),
            4 => Some(Self::String),
            5 => Some(Self::Color),
            6 => Some(Self::None),
            _ => None,
        }
    }

    /// Schema name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Color => "color",
            Self::None => "none",
        }
    }

    /// Parses a schema type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tagged value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Param {
    /// No value
    #[default]
    None,
    /// Unsigned byte
    Byte(u8),
    /// Signed integer
    Int(i32),
    /// Float
    Float(f32),
    /// Boolean
    Bool(bool),
    /// String
    String(String),
    /// Color
    Color(Color),
}

impl Param {
    /// Returns the discriminant.
    #[must_use]
    pub const fn param_type(&self) -> ParamType {
        match self {
            Self::None => ParamType::None,
            Self::Byte(_) => ParamType::Byte,
            Self::Int(_) => ParamType::Int,
            Self::Float(_) => ParamType::Float,
            Self::Bool(_) => ParamType::Bool,
            Self::String(_) => ParamType::String,
            Self::Color(_) => ParamType::Color,
        }
    }

    /// Returns the held value as `T`, or `default` if the type differs.
    #[must_use]
    pub fn get<T: ParamValue>(&self, default: T) -> T {
        T::from_param(self).unwrap_or(default)
    }

    /// Replaces both the type and the value.
    pub fn set<T: ParamValue>(&mut self, value: T) {
        *self = value.into_param();
    }

    /// Borrows the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Decodes a tagged value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParamType` for an unknown tag, or any cursor error
    /// raised while reading the payload.
    pub fn read(reader: &mut ByteReader<'_>) -> CursorResult<Self> {
        let tag = reader.read::<u8>()?;
        let ty = ParamType::from_u8(tag).ok_or(CursorError::UnknownParamType(tag))?;

        Ok(match ty {
            ParamType::Byte => Self::Byte(reader.read()?),
            ParamType::Int => Self::Int(reader.read()?),
            ParamType::Float => Self::Float(reader.read()?),
            ParamType::Bool => Self::Bool(reader.read_bool()?),
            ParamType::String => Self::String(reader.read_string()?),
            ParamType::Color => Self::Color(reader.read()?),
            ParamType::None => Self::None,
        })
    }

    /// Encodes the tag followed by the payload.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the writer's limit is exceeded.
    pub fn write(&self, writer: &mut ByteWriter) -> CursorResult<()> {
        writer.write(self.param_type() as u8)?;
        match self {
            Self::None => Ok(()),
            Self::Byte(v) => writer.write(*v),
            Self::Int(v) => writer.write(*v),
            Self::Float(v) => writer.write(*v),
            Self::Bool(v) => writer.write_bool(*v),
            Self::String(v) => writer.write_string(v),
            Self::Color(v) => writer.write(*v),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Color(c) => write!(f, "({}, {}, {}, {})", c.r, c.g, c.b, c.a),
        }
    }
}

/// Rust types that map onto exactly one [`Param`] variant.
pub trait ParamValue: Sized {
    /// Tag of the matching variant.
    const TYPE: ParamType;

    /// Extracts the value if `param` holds this type.
    fn from_param(param: &Param) -> Option<Self>;

    /// Wraps the value in its variant.
    fn into_param(self) -> Param;
}

macro_rules! impl_param_value {
    ($ty:ty, $variant:ident) => {
        impl ParamValue for $ty {
            const TYPE: ParamType = ParamType::$variant;

            fn from_param(param: &Param) -> Option<Self> {
                match param {
                    Param::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_param(self) -> Param {
                Param::$variant(self)
            }
        }

        impl From<$ty> for Param {
            fn from(value: $ty) -> Self {
                Param::$variant(value)
            }
        }
    };
}

impl_param_value!(u8, Byte);
impl_param_value!(i32, Int);
impl_param_value!(f32, Float);
impl_param_value!(bool, Bool);
impl_param_value!(String, String);
impl_param_value!(Color, Color);

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
