//! # HEARTH
//!
//! The asset pipeline, integrating all units.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HEARTH PIPELINE                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌────────────────┐   ┌────────────────┐   ┌──────────────┐  │
//! │  │  hearth_core   │──>│ hearth_assets  │   │ hearth_schema│  │
//! │  │                │   │                │   │              │  │
//! │  │  • Cursor      │   │  • Container   │   │  • Options   │  │
//! │  │  • Param       │   │  • Envelope    │   │  • Params    │  │
//! │  │  • Sector      │   │  • Records     │   │  • Classes   │  │
//! │  └───────┬────────┘   └───────┬────────┘   └──────┬───────┘  │
//! │          └────────────────────┼───────────────────┘          │
//! │                               v                              │
//! │                     ┌──────────────────┐                     │
//! │                     │     Pipeline     │                     │
//! │                     │  config, startup │                     │
//! │                     │  level checks    │                     │
//! │                     └──────────────────┘                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: Pipeline configuration from TOML
//! - `pipeline`: Startup and level load/save
//! - `validate`: Level checks against the class graph

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod validate;

// Re-export the units
pub use hearth_assets as assets;
pub use hearth_core as core;
pub use hearth_schema as schema;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use validate::LevelIssue;
