//! # Actor Class Graph
//!
//! Owns every [`ActorDefinition`] and links them by single inheritance.
//!
//! Loading is two-phase:
//!
//! 1. [`ActorClassGraph::insert`] / [`ActorClassGraph::load_directory`]
//!    collect classes by name, in any order.
//! 2. [`ActorClassGraph::resolve`] links parents, rejects cycles and binds
//!    option parameters to their lists.
//!
//! Queries that walk inheritance return `SchemaError::Unresolved` until
//! phase two has succeeded.
//!
//! ## Shadowing
//!
//! A child may redeclare a param, input or output of an ancestor. Lookups
//! walk leaf-first, so the child's declaration wins; the merged name sets
//! only record membership.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use hearth_core::{scan_directory, Actor, Param, ParamType};
use indexmap::IndexSet;

use crate::actor_def::ActorDefinition;
use crate::error::{SchemaError, SchemaResult};
use crate::options::OptionRegistry;
use crate::param_def::{ParamDefinition, ParamKind};
use crate::signal::SignalDefinition;

/// Handle to a class inside an [`ActorClassGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorClassId(u32);

impl ActorClassId {
    /// Position in the graph.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Every actor class known to the pipeline.
#[derive(Debug, Default)]
pub struct ActorClassGraph {
    classes: Vec<ActorDefinition>,
    by_name: HashMap<String, ActorClassId>,
    resolved: bool,
}

impl ActorClassGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. The graph must be resolved again afterwards.
    ///
    /// # Errors
    ///
    /// `DuplicateClass` if a class with the same name exists.
    pub fn insert(&mut self, definition: ActorDefinition) -> SchemaResult<ActorClassId> {
        if self.by_name.contains_key(&definition.class_name) {
            return Err(SchemaError::DuplicateClass(definition.class_name));
        }
        let id = u32::try_from(self.classes.len())
            .map(ActorClassId)
            .map_err(|_| SchemaError::IncorrectFormat("too many actor classes".into()))?;
        self.by_name.insert(definition.class_name.clone(), id);
        self.classes.push(definition);
        self.resolved = false;
        Ok(id)
    }

    /// Loads every `*.<extension>` file under `dir`, in file-name order.
    ///
    /// A class name seen twice keeps the first file and logs a warning.
    /// Returns the number of classes added.
    ///
    /// # Errors
    ///
    /// `Io` if the directory cannot be scanned, or the first file that
    /// fails to parse.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>, extension: &str) -> SchemaResult<usize> {
        let dir = dir.as_ref();
        let files = scan_directory(dir, extension).map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut added = 0;
        for relative in &files {
            match self.insert(ActorDefinition::create(dir.join(relative))?) {
                Ok(_) => added += 1,
                Err(SchemaError::DuplicateClass(name)) => {
                    tracing::warn!(
                        class = %name,
                        path = %relative.display(),
                        "duplicate actor class skipped"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(dir = %dir.display(), count = added, "loaded actor classes");
        Ok(added)
    }

    /// Links parents, rejects cycles and binds option params.
    ///
    /// On failure the graph stays unresolved.
    ///
    /// # Errors
    ///
    /// `SelfParent`, `MissingParent`, `InheritanceCycle`,
    /// `MissingOptionList` or `UnknownOptionLabel`.
    pub fn resolve(&mut self, options: &OptionRegistry) -> SchemaResult<()> {
        self.resolved = false;

        let parents = self
            .classes
            .iter()
            .map(|class| self.parent_of(class))
            .collect::<SchemaResult<Vec<_>>>()?;
        for (class, parent) in self.classes.iter_mut().zip(parents) {
            class.parent = parent;
        }

        if let Some(cycle) = self.find_cycle() {
            let names = cycle
                .into_iter()
                .filter_map(|id| self.by_id(id))
                .map(|class| class.class_name.clone())
                .collect();
            return Err(SchemaError::InheritanceCycle(names));
        }

        for ActorDefinition {
            class_name, params, ..
        } in &mut self.classes
        {
            for (param_name, definition) in params.iter_mut() {
                bind_option_param(class_name, param_name, definition, options)?;
            }
        }

        self.resolved = true;
        tracing::info!(
            classes = self.classes.len(),
            concrete = self.concrete_classes().count(),
            "resolved actor class graph"
        );
        Ok(())
    }

    fn parent_of(&self, class: &ActorDefinition) -> SchemaResult<Option<ActorClassId>> {
        if !class.has_parent() {
            return Ok(None);
        }
        if class.parent_class_name == class.class_name {
            return Err(SchemaError::SelfParent(class.class_name.clone()));
        }
        self.id_of(&class.parent_class_name)
            .map(Some)
            .ok_or_else(|| SchemaError::MissingParent {
                class: class.class_name.clone(),
                parent: class.parent_class_name.clone(),
            })
    }

    /// Finds a parent chain that loops back on itself.
    ///
    /// Returns the chain with the repeated class at both ends.
    fn find_cycle(&self) -> Option<Vec<ActorClassId>> {
        let mut visited = HashSet::new();

        for start in self.ids() {
            let mut rec_stack = HashSet::new();
            let mut path = Vec::new();
            let mut current = Some(start);

            while let Some(id) = current {
                if rec_stack.contains(&id) {
                    let cycle_start = path.iter().position(|&p| p == id).unwrap_or(0);
                    let mut cycle = path[cycle_start..].to_vec();
                    cycle.push(id);
                    return Some(cycle);
                }
                if !visited.insert(id) {
                    break;
                }
                rec_stack.insert(id);
                path.push(id);
                current = self.by_id(id).and_then(|class| class.parent);
            }
        }

        None
    }

    #[allow(clippy::cast_possible_truncation)]
    fn ids(&self) -> impl Iterator<Item = ActorClassId> {
        // insert keeps the count within u32
        (0..self.classes.len()).map(|i| ActorClassId(i as u32))
    }

    /// Returns true once [`Self::resolve`] has succeeded.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Class by name.
    #[must_use]
    pub fn get(&self, class: &str) -> Option<&ActorDefinition> {
        self.id_of(class).and_then(|id| self.by_id(id))
    }

    /// Handle for a class name.
    #[must_use]
    pub fn id_of(&self, class: &str) -> Option<ActorClassId> {
        self.by_name.get(class).copied()
    }

    /// Class by handle.
    #[must_use]
    pub fn by_id(&self, id: ActorClassId) -> Option<&ActorDefinition> {
        self.classes.get(id.index())
    }

    /// All classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorDefinition> {
        self.classes.iter()
    }

    /// Classes that can be placed in a level.
    pub fn concrete_classes(&self) -> impl Iterator<Item = &ActorDefinition> {
        self.classes.iter().filter(|class| !class.is_virtual)
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the graph has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn resolved_id(&self, class: &str) -> SchemaResult<ActorClassId> {
        if !self.resolved {
            return Err(SchemaError::Unresolved);
        }
        self.id_of(class)
            .ok_or_else(|| SchemaError::UnknownClass(class.to_owned()))
    }

    /// `id` and its ancestors, leaf first. Bounded by the class count.
    fn chain(&self, id: ActorClassId) -> impl Iterator<Item = &ActorDefinition> {
        std::iter::successors(self.by_id(id), |class| {
            class.parent.and_then(|parent| self.by_id(parent))
        })
        .take(self.classes.len())
    }

    /// Names of `class`'s ancestors, nearest first.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn ancestors(&self, class: &str) -> SchemaResult<Vec<&str>> {
        let id = self.resolved_id(class)?;
        Ok(self
            .chain(id)
            .skip(1)
            .map(|class| class.class_name.as_str())
            .collect())
    }

    /// Returns true if `class` is `ancestor` or inherits from it.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass` for `class`.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> SchemaResult<bool> {
        let id = self.resolved_id(class)?;
        Ok(self.chain(id).any(|class| class.class_name == ancestor))
    }

    fn merged_names<'a, I>(
        &'a self,
        class: &str,
        select: impl Fn(&'a ActorDefinition) -> I,
    ) -> SchemaResult<IndexSet<&'a str>>
    where
        I: Iterator<Item = &'a String>,
    {
        let id = self.resolved_id(class)?;
        let lineage: Vec<_> = self.chain(id).collect();
        Ok(lineage
            .into_iter()
            .rev()
            .flat_map(select)
            .map(String::as_str)
            .collect())
    }

    /// Every param name of `class`, ancestors' first.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn param_names(&self, class: &str) -> SchemaResult<IndexSet<&str>> {
        self.merged_names(class, |def| def.params.keys())
    }

    /// Every input name of `class`, ancestors' first.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn input_names(&self, class: &str) -> SchemaResult<IndexSet<&str>> {
        self.merged_names(class, |def| def.inputs.keys())
    }

    /// Every output name of `class`, ancestors' first.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn output_names(&self, class: &str) -> SchemaResult<IndexSet<&str>> {
        self.merged_names(class, |def| def.outputs.keys())
    }

    /// Nearest declaration of param `name` on `class` or an ancestor.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn get_param(&self, class: &str, name: &str) -> SchemaResult<Option<&ParamDefinition>> {
        let id = self.resolved_id(class)?;
        Ok(self.chain(id).find_map(|def| def.params.get(name)))
    }

    /// Nearest declaration of input `name`.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn get_input(&self, class: &str, name: &str) -> SchemaResult<Option<&SignalDefinition>> {
        let id = self.resolved_id(class)?;
        Ok(self.chain(id).find_map(|def| def.inputs.get(name)))
    }

    /// Nearest declaration of output `name`.
    ///
    /// # Errors
    ///
    /// `Unresolved` or `UnknownClass`.
    pub fn get_output(&self, class: &str, name: &str) -> SchemaResult<Option<&SignalDefinition>> {
        let id = self.resolved_id(class)?;
        Ok(self.chain(id).find_map(|def| def.outputs.get(name)))
    }

    /// Writes the default of every param `class` declares into `actor`.
    ///
    /// Existing values for those names are overwritten; other params are
    /// left alone.
    ///
    /// # Errors
    ///
    /// `Unresolved`, `UnknownClass`, or `UnknownOptionLabel` from an option
    /// default.
    pub fn apply_definition(
        &self,
        class: &str,
        actor: &mut Actor,
        options: &OptionRegistry,
    ) -> SchemaResult<()> {
        let id = self.resolved_id(class)?;
        for name in self.param_names(class)? {
            if let Some(definition) = self.chain(id).find_map(|def| def.params.get(name)) {
                actor
                    .params
                    .insert(name.to_owned(), definition.default_param(options)?);
            }
        }
        Ok(())
    }

    /// Creates an actor of `class` holding every param default.
    ///
    /// # Errors
    ///
    /// `VirtualClass` for a virtual class, otherwise as
    /// [`Self::apply_definition`].
    pub fn instantiate(
        &self,
        class: &str,
        name: &str,
        options: &OptionRegistry,
    ) -> SchemaResult<Actor> {
        let id = self.resolved_id(class)?;
        if self.by_id(id).is_some_and(|def| def.is_virtual) {
            return Err(SchemaError::VirtualClass(class.to_owned()));
        }
        let mut actor = Actor::new(class, name);
        self.apply_definition(class, &mut actor, options)?;
        tracing::debug!(class, actor = name, params = actor.params.len(), "instantiated actor");
        Ok(actor)
    }

    /// Checks one param value against the declaration `class` sees.
    ///
    /// # Errors
    ///
    /// `UndeclaredParam` or `InvalidParamValue`, plus the lookup errors.
    pub fn check_param(
        &self,
        class: &str,
        name: &str,
        value: &Param,
        options: &OptionRegistry,
    ) -> SchemaResult<()> {
        let definition = self
            .get_param(class, name)?
            .ok_or_else(|| SchemaError::UndeclaredParam {
                class: class.to_owned(),
                param: name.to_owned(),
            })?;
        if definition.accepts(value, options) {
            Ok(())
        } else {
            Err(SchemaError::InvalidParamValue {
                class: class.to_owned(),
                param: name.to_owned(),
                value: value.to_string(),
            })
        }
    }

    /// Checks every param of `actor` against its class.
    ///
    /// # Errors
    ///
    /// The first failing param, or `UnknownClass` for its type name.
    pub fn validate_actor(&self, actor: &Actor, options: &OptionRegistry) -> SchemaResult<()> {
        self.resolved_id(&actor.type_name)?;
        for (name, value) in &actor.params {
            self.check_param(&actor.type_name, name, value, options)?;
        }
        Ok(())
    }
}

fn bind_option_param(
    class: &str,
    param: &str,
    definition: &mut ParamDefinition,
    options: &OptionRegistry,
) -> SchemaResult<()> {
    let ParamKind::Option {
        list_name,
        resolved,
        default_label,
    } = &mut definition.kind
    else {
        return Ok(());
    };

    let Some((id, list)) = options
        .id_of(list_name)
        .and_then(|id| options.by_id(id).map(|list| (id, list)))
    else {
        return Err(SchemaError::MissingOptionList {
            class: class.to_owned(),
            param: param.to_owned(),
            list: list_name.clone(),
        });
    };

    if !default_label.is_empty() && list.get_value(default_label).is_none() {
        return Err(SchemaError::UnknownOptionLabel {
            list: list_name.clone(),
            label: default_label.clone(),
        });
    }

    if definition.param_type != ParamType::None && definition.param_type != list.value_type() {
        tracing::warn!(
            class,
            param,
            declared = %definition.param_type,
            list_type = %list.value_type(),
            "option param type differs from its list, using the list type"
        );
    }
    *resolved = Some(id);
    definition.param_type = list.value_type();
    Ok(())
}
