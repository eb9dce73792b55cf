//! # Schema Error Types
//!
//! All errors that can occur while loading or resolving schema files.
//!
//! Resolution errors (`SelfParent`, `MissingParent`, `InheritanceCycle`,
//! `MissingOptionList`, `UnknownOptionLabel`) mean the schema set is broken;
//! hosts treat them as fatal at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the schema system.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema file or directory could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A schema file is not valid TOML.
    #[error("{origin} is not valid TOML: {message}")]
    Parse {
        /// File or class the text came from.
        origin: String,
        /// Parser message.
        message: String,
    },

    /// A schema node has a missing, unknown or out-of-range field.
    #[error("incorrect format: {0}")]
    IncorrectFormat(String),

    /// Two option lists share a name.
    #[error("option list {0:?} is defined twice")]
    DuplicateOptionList(String),

    /// Two actor classes share a name.
    #[error("actor class {0:?} is defined twice")]
    DuplicateClass(String),

    /// A class names itself as its parent.
    #[error("actor class {0:?} cannot be its own parent")]
    SelfParent(String),

    /// A class extends a class that does not exist.
    #[error("actor class {class:?} extends unknown class {parent:?}")]
    MissingParent {
        /// Child class.
        class: String,
        /// Missing parent.
        parent: String,
    },

    /// The parent chain loops back on itself.
    #[error("inheritance cycle: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),

    /// An option parameter names a list that does not exist.
    #[error("param {class}.{param} references unknown option list {list:?}")]
    MissingOptionList {
        /// Owning class.
        class: String,
        /// Parameter name.
        param: String,
        /// Missing list.
        list: String,
    },

    /// An option default names a label its list does not have.
    #[error("option list {list:?} has no label {label:?}")]
    UnknownOptionLabel {
        /// Option list.
        list: String,
        /// Missing label.
        label: String,
    },

    /// The class graph has not been resolved yet.
    #[error("actor class graph is not resolved")]
    Unresolved,

    /// No class with this name.
    #[error("unknown actor class {0:?}")]
    UnknownClass(String),

    /// Virtual classes only exist to be extended.
    #[error("actor class {0:?} is virtual and cannot be instantiated")]
    VirtualClass(String),

    /// An actor carries a param its class does not declare.
    #[error("actor class {class:?} declares no param {param:?}")]
    UndeclaredParam {
        /// Actor class.
        class: String,
        /// Parameter name.
        param: String,
    },

    /// An actor param has the wrong type or is out of range.
    #[error("value {value} is not valid for param {class}.{param}")]
    InvalidParamValue {
        /// Actor class.
        class: String,
        /// Parameter name.
        param: String,
        /// Offending value, rendered.
        value: String,
    },
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
