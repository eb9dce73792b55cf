//! # HEARTH Core
//!
//! Foundations shared by the asset and schema crates.
//!
//! ## Contents
//!
//! 1. **Binary cursor** - bounds-checked `ByteReader` / `ByteWriter`
//! 2. **Params** - the tagged value type stored on actors and records
//! 3. **Sectors** - simple-polygon validation for level geometry
//! 4. **Actors** - placed instances with concrete params and signal wires
//!
//! ## Wire Format
//!
//! Every value is written in host byte order with no padding. Strings are
//! prefixed with a `u64` length that counts a trailing NUL.
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::{ByteReader, ByteWriter, Param};
//!
//! let mut writer = ByteWriter::new();
//! Param::Int(7).write(&mut writer).unwrap();
//!
//! let bytes = writer.into_inner();
//! let param = Param::read(&mut ByteReader::new(&bytes)).unwrap();
//! assert_eq!(param.get(0i32), 7);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod actor;
pub mod cursor;
pub mod error;
pub mod math;
pub mod param;
pub mod scan;
pub mod sector;

pub use actor::{Actor, IOConnection};
pub use cursor::{ByteReader, ByteWriter};
pub use error::{CursorError, CursorResult};
pub use math::{Color, Vec2};
pub use param::{Param, ParamType, ParamValue};
pub use scan::scan_directory;
pub use sector::{orientation, segments_intersect, Orientation, Sector};
