//! # Schema Registry
//!
//! The resolved pair of option lists and actor classes a pipeline runs on.
//! Built once at startup, read-only afterwards.

use hearth_core::{Actor, Param};

use crate::class_graph::ActorClassGraph;
use crate::config::SchemaConfig;
use crate::error::SchemaResult;
use crate::options::OptionRegistry;

/// Option lists plus the resolved class graph.
#[derive(Debug)]
pub struct SchemaRegistry {
    options: OptionRegistry,
    classes: ActorClassGraph,
}

impl SchemaRegistry {
    /// Loads both schema trees described by `config` and resolves the graph.
    ///
    /// # Errors
    ///
    /// Any load or resolution error. A registry is never returned
    /// unresolved.
    pub fn load(config: &SchemaConfig) -> SchemaResult<Self> {
        let mut options = OptionRegistry::new();
        options.load_directory(config.options_path(), &config.extension)?;

        let mut classes = ActorClassGraph::new();
        classes.load_directory(config.actors_path(), &config.extension)?;

        let registry = Self::from_parts(options, classes)?;
        tracing::info!(
            root = %config.root.display(),
            option_lists = registry.options.len(),
            classes = registry.classes.len(),
            "schema registry ready"
        );
        Ok(registry)
    }

    /// Resolves `classes` against `options` and bundles them.
    ///
    /// # Errors
    ///
    /// Any resolution error.
    pub fn from_parts(options: OptionRegistry, mut classes: ActorClassGraph) -> SchemaResult<Self> {
        classes.resolve(&options)?;
        Ok(Self { options, classes })
    }

    /// Option lists.
    #[must_use]
    pub const fn options(&self) -> &OptionRegistry {
        &self.options
    }

    /// Actor classes.
    #[must_use]
    pub const fn classes(&self) -> &ActorClassGraph {
        &self.classes
    }

    /// Creates an actor of `class` with every param default.
    ///
    /// # Errors
    ///
    /// See [`ActorClassGraph::instantiate`].
    pub fn instantiate(&self, class: &str, name: &str) -> SchemaResult<Actor> {
        self.classes.instantiate(class, name, &self.options)
    }

    /// Checks one param value of an actor of `class`.
    ///
    /// # Errors
    ///
    /// See [`ActorClassGraph::check_param`].
    pub fn check_param(&self, class: &str, name: &str, value: &Param) -> SchemaResult<()> {
        self.classes.check_param(class, name, value, &self.options)
    }

    /// Checks every param of `actor`.
    ///
    /// # Errors
    ///
    /// See [`ActorClassGraph::validate_actor`].
    pub fn validate_actor(&self, actor: &Actor) -> SchemaResult<()> {
        self.classes.validate_actor(actor, &self.options)
    }
}
