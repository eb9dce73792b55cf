//! # HEARTH Schema
//!
//! Data-driven descriptions of actor classes.
//!
//! ## Pieces
//!
//! 1. **Option lists** - named label -> value enumerations
//! 2. **Param definitions** - type, bounds and default of one actor param
//! 3. **Actor classes** - params, signals and display hints, with single
//!    inheritance
//! 4. **Registry** - the resolved bundle a pipeline runs on
//!
//! ## Startup
//!
//! ```rust,no_run
//! use hearth_schema::{SchemaConfig, SchemaRegistry};
//!
//! let registry = SchemaRegistry::load(&SchemaConfig::with_root("data/schemas"))?;
//! let door = registry.instantiate("door", "door_1")?;
//! assert_eq!(door.type_name, "door");
//! # Ok::<(), hearth_schema::SchemaError>(())
//! ```
//!
//! Resolution failures (missing parents, cycles, missing option lists) are
//! returned from `load`; a host should refuse to start on them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod actor_def;
pub mod class_graph;
pub mod config;
pub mod error;
mod fields;
pub mod options;
pub mod param_def;
pub mod registry;
pub mod signal;

pub use actor_def::ActorDefinition;
pub use class_graph::{ActorClassGraph, ActorClassId};
pub use config::SchemaConfig;
pub use error::{SchemaError, SchemaResult};
pub use options::{OptionDefinition, OptionId, OptionRegistry};
pub use param_def::{ParamDefinition, ParamKind, StringHint};
pub use registry::SchemaRegistry;
pub use signal::{RenderDefinition, SignalDefinition};
