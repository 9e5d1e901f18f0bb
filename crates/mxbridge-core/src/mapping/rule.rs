//! Declarative mapping tables
//!
//! Every field correspondence a mapper performs is declared as a
//! [`MappingRule`] in an ordered table. Simple correspondences execute
//! directly over the JSON value tree; anything that needs typed logic is
//! routed through a named qualifier function registered on the table. The
//! table also declares the universe of known target fields so that targets
//! covered by no rule can be surfaced per the configured policy.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::MapperConfig;
use crate::error::{Error, Result};
use crate::mapping::path::{get_path, set_path};
use crate::mapping::trace::TransformTrace;
use crate::message_type::MessageType;

/// How to react to declared target fields that no rule covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedTargetPolicy {
    /// Log a warning and record a trace entry per uncovered field.
    #[default]
    Warn,
    /// Stay silent.
    Ignore,
}

/// A derivation function for `Derived` and `Aggregate` rules.
///
/// Receives the whole source document tree; returns the value to place at the
/// rule's target path, or `None` when the derivation has nothing to emit.
pub type QualifierFn = fn(&Value, &MapperConfig, &mut TransformTrace) -> Result<Option<Value>>;

/// What a single mapping rule does.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Copy the source value verbatim.
    Direct,
    /// Deliberately leave the target unset.
    Ignore,
    /// Place a fixed value.
    Constant(Value),
    /// One target value computed from source data by a named qualifier.
    Derived(&'static str),
    /// A target collection built from source collections by a named
    /// qualifier.
    Aggregate(&'static str),
}

/// One source-to-target correspondence.
#[derive(Debug, Clone)]
pub struct MappingRule {
    pub source_path: &'static str,
    pub target_path: &'static str,
    pub kind: RuleKind,
}

impl MappingRule {
    pub fn direct(source_path: &'static str, target_path: &'static str) -> Self {
        Self {
            source_path,
            target_path,
            kind: RuleKind::Direct,
        }
    }

    pub fn ignore(target_path: &'static str) -> Self {
        Self {
            source_path: "",
            target_path,
            kind: RuleKind::Ignore,
        }
    }

    pub fn constant(target_path: &'static str, value: Value) -> Self {
        Self {
            source_path: "",
            target_path,
            kind: RuleKind::Constant(value),
        }
    }

    pub fn derived(
        source_path: &'static str,
        target_path: &'static str,
        qualifier: &'static str,
    ) -> Self {
        Self {
            source_path,
            target_path,
            kind: RuleKind::Derived(qualifier),
        }
    }

    pub fn aggregate(
        source_path: &'static str,
        target_path: &'static str,
        qualifier: &'static str,
    ) -> Self {
        Self {
            source_path,
            target_path,
            kind: RuleKind::Aggregate(qualifier),
        }
    }
}

/// An ordered mapping table for one transformation pair.
pub struct MappingTable {
    source_type: MessageType,
    target_type: MessageType,
    rules: Vec<MappingRule>,
    qualifiers: HashMap<&'static str, QualifierFn>,
    policy: UnmappedTargetPolicy,
    /// Declared target fields covered by no rule, resolved once at build
    /// time since both the rules and the field universe are static.
    uncovered_targets: Vec<&'static str>,
}

impl MappingTable {
    pub fn new(
        source_type: MessageType,
        target_type: MessageType,
        rules: Vec<MappingRule>,
        qualifiers: HashMap<&'static str, QualifierFn>,
        target_fields: &'static [&'static str],
        policy: UnmappedTargetPolicy,
    ) -> Self {
        let uncovered_targets = target_fields
            .iter()
            .filter(|field| {
                // An Ignore rule counts as coverage: leaving the target unset
                // was a decision, not an omission.
                !rules.iter().any(|rule| {
                    rule.target_path == **field
                        || rule
                            .target_path
                            .strip_prefix(**field)
                            .is_some_and(|rest| rest.starts_with('.'))
                })
            })
            .copied()
            .collect();
        Self {
            source_type,
            target_type,
            rules,
            qualifiers,
            policy,
            uncovered_targets,
        }
    }

    pub fn source_type(&self) -> MessageType {
        self.source_type
    }

    pub fn target_type(&self) -> MessageType {
        self.target_type
    }

    /// Declared target fields no rule writes to or explicitly ignores.
    pub fn uncovered_targets(&self) -> &[&'static str] {
        &self.uncovered_targets
    }

    /// Executes every rule in declaration order against the source tree and
    /// returns the assembled target tree.
    pub fn apply(
        &self,
        source: &Value,
        config: &MapperConfig,
        trace: &mut TransformTrace,
    ) -> Result<Value> {
        let mut target = Value::Object(Map::new());
        for rule in &self.rules {
            match &rule.kind {
                RuleKind::Direct => match get_path(source, rule.source_path) {
                    Some(v) if !v.is_null() => set_path(&mut target, rule.target_path, v.clone()),
                    _ => trace.record_absent_source(
                        rule.source_path,
                        format!("no source value for {}", rule.target_path),
                    ),
                },
                RuleKind::Ignore => trace.record_ignored(
                    rule.target_path,
                    "target deliberately left unset by mapping rule",
                ),
                RuleKind::Constant(value) => {
                    set_path(&mut target, rule.target_path, value.clone());
                }
                RuleKind::Derived(name) | RuleKind::Aggregate(name) => {
                    let qualifier = self.qualifiers.get(name).ok_or_else(|| {
                        Error::engine(
                            format!("mapping table references unknown qualifier '{name}'"),
                            self.source_type,
                            self.target_type,
                            None,
                        )
                    })?;
                    match qualifier(source, config, trace)? {
                        Some(v) => set_path(&mut target, rule.target_path, v),
                        None => trace.record_absent_source(
                            rule.source_path,
                            format!("qualifier '{name}' produced no value"),
                        ),
                    }
                }
            }
        }
        self.report_uncovered(trace);
        Ok(target)
    }

    fn report_uncovered(&self, trace: &mut TransformTrace) {
        if self.policy == UnmappedTargetPolicy::Ignore {
            return;
        }
        for field in &self.uncovered_targets {
            warn!(
                source = %self.source_type,
                target = %self.target_type,
                field,
                "declared target field covered by no mapping rule"
            );
            trace.record_unmapped(*field, "covered by no mapping rule");
        }
    }
}
