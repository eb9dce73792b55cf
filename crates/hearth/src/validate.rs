//! # Level Validation
//!
//! Checks a level document against the schema registry. Validation never
//! stops at the first problem; every issue is collected so an editor can
//! list them all.

use std::collections::HashSet;

use hearth_assets::LevelAsset;
use hearth_core::{Actor, IOConnection, Param};
use hearth_schema::{SchemaError, SchemaRegistry};
use thiserror::Error;

/// One problem found in a level.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum LevelIssue {
    /// A sector polygon is degenerate or self-intersecting.
    #[error("sector {index} is not a simple polygon")]
    InvalidSector {
        /// Position in the sector list.
        index: usize,
    },

    /// A sector's wall material list does not have one entry per edge.
    #[error("sector {index} has {walls} wall materials for {points} points")]
    WallCountMismatch {
        /// Position in the sector list.
        index: usize,
        /// Number of polygon points (and edges).
        points: usize,
        /// Number of wall materials.
        walls: usize,
    },

    /// Two actors share a name.
    #[error("actor name {name:?} is used more than once")]
    DuplicateActorName {
        /// Shared name.
        name: String,
    },

    /// An actor's class does not exist.
    #[error("actor {actor:?} has unknown class {class:?}")]
    UnknownClass {
        /// Actor name.
        actor: String,
        /// Missing class.
        class: String,
    },

    /// An actor was placed from a virtual class.
    #[error("actor {actor:?} uses virtual class {class:?}")]
    VirtualClass {
        /// Actor name.
        actor: String,
        /// Virtual class.
        class: String,
    },

    /// An actor carries a param its class does not declare.
    #[error("actor {actor:?} has undeclared param {param:?}")]
    UndeclaredParam {
        /// Actor name.
        actor: String,
        /// Param name.
        param: String,
    },

    /// A param value has the wrong type or is out of range.
    #[error("actor {actor:?} param {param:?} has invalid value {value}")]
    InvalidParamValue {
        /// Actor name.
        actor: String,
        /// Param name.
        param: String,
        /// Offending value.
        value: Param,
    },

    /// A connection fires an output the source class does not declare.
    #[error("actor {actor:?} has no output {output:?}")]
    UndeclaredOutput {
        /// Source actor.
        actor: String,
        /// Output name.
        output: String,
    },

    /// A connection targets an actor that is not in the level.
    #[error("actor {actor:?} connects to missing actor {target:?}")]
    MissingTarget {
        /// Source actor.
        actor: String,
        /// Missing target.
        target: String,
    },

    /// A connection feeds an input the target class does not declare.
    #[error("actor {target:?} has no input {input:?} (wired from {actor:?})")]
    UndeclaredInput {
        /// Source actor.
        actor: String,
        /// Target actor.
        target: String,
        /// Input name.
        input: String,
    },

    /// A connection's payload does not match the target input's type.
    #[error("input {target}.{input} cannot take {value} (wired from {actor:?})")]
    InvalidPayload {
        /// Source actor.
        actor: String,
        /// Target actor.
        target: String,
        /// Input name.
        input: String,
        /// Payload carried by the connection.
        value: Param,
    },
}

/// Collects every issue in `level`.
pub(crate) fn validate_level(schema: &SchemaRegistry, level: &LevelAsset) -> Vec<LevelIssue> {
    let mut issues = Vec::new();

    for (index, sector) in level.sectors.iter().enumerate() {
        if !sector.is_valid() {
            issues.push(LevelIssue::InvalidSector { index });
        }
        if sector.wall_materials.len() != sector.points.len() {
            issues.push(LevelIssue::WallCountMismatch {
                index,
                points: sector.points.len(),
                walls: sector.wall_materials.len(),
            });
        }
    }

    let mut seen = HashSet::new();
    for actor in &level.actors {
        if !seen.insert(actor.name.as_str()) {
            issues.push(LevelIssue::DuplicateActorName {
                name: actor.name.clone(),
            });
        }

        match schema.classes().get(&actor.type_name) {
            None => {
                issues.push(LevelIssue::UnknownClass {
                    actor: actor.name.clone(),
                    class: actor.type_name.clone(),
                });
                continue;
            }
            Some(class) if class.is_virtual => issues.push(LevelIssue::VirtualClass {
                actor: actor.name.clone(),
                class: actor.type_name.clone(),
            }),
            Some(_) => {}
        }

        check_params(schema, actor, &mut issues);
        for connection in &actor.connections {
            check_connection(schema, level, actor, connection, &mut issues);
        }
    }

    for issue in &issues {
        tracing::warn!(level = %level.name, %issue, "level issue");
    }
    issues
}

fn check_params(schema: &SchemaRegistry, actor: &Actor, issues: &mut Vec<LevelIssue>) {
    for (param, value) in &actor.params {
        match schema.check_param(&actor.type_name, param, value) {
            Ok(()) => {}
            Err(SchemaError::UndeclaredParam { .. }) => issues.push(LevelIssue::UndeclaredParam {
                actor: actor.name.clone(),
                param: param.clone(),
            }),
            Err(e) => {
                tracing::debug!(actor = %actor.name, error = %e, "param rejected");
                issues.push(LevelIssue::InvalidParamValue {
                    actor: actor.name.clone(),
                    param: param.clone(),
                    value: value.clone(),
                });
            }
        }
    }
}

fn check_connection(
    schema: &SchemaRegistry,
    level: &LevelAsset,
    actor: &Actor,
    connection: &IOConnection,
    issues: &mut Vec<LevelIssue>,
) {
    let classes = schema.classes();

    if let Ok(None) = classes.get_output(&actor.type_name, &connection.source_output) {
        issues.push(LevelIssue::UndeclaredOutput {
            actor: actor.name.clone(),
            output: connection.source_output.clone(),
        });
    }

    let Some(target) = level.actor(&connection.target_name) else {
        issues.push(LevelIssue::MissingTarget {
            actor: actor.name.clone(),
            target: connection.target_name.clone(),
        });
        return;
    };

    // an unknown target class is reported on the target itself
    match classes.get_input(&target.type_name, &connection.target_input) {
        Ok(None) => issues.push(LevelIssue::UndeclaredInput {
            actor: actor.name.clone(),
            target: target.name.clone(),
            input: connection.target_input.clone(),
        }),
        Ok(Some(input)) if !input.accepts(&connection.param) => {
            issues.push(LevelIssue::InvalidPayload {
                actor: actor.name.clone(),
                target: target.name.clone(),
                input: connection.target_input.clone(),
                value: connection.param.clone(),
            });
        }
        Ok(Some(_)) | Err(_) => {}
    }
}
