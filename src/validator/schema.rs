//! Property-schema tables and the expression-checker seam.
//!
//! The allowed-property set per state kind is configuration, not code: a
//! [`SchemaRegistry`] maps kinds and rule shapes to [`ObjectSchema`] values
//! whose entries may be composite — a mutually-exclusive group, an
//! array-of-schema, a value-of-schema, or an expression-typed field handed
//! to the host's [`ExpressionChecker`]. The shipped
//! [`SchemaRegistry::default_asl`] tables mirror the ASL specification;
//! hosts may inject their own.

use rustc_hash::FxHashMap;

use crate::definition::StateKind;

use super::diagnostics::DiagnosticCode;

/// What flavor of expression a schema entry expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// A JSONPath reference field (`InputPath`, `SecondsPath`, ...).
    JsonPath,
    /// A payload-template value that may use intrinsic functions.
    Intrinsic,
    /// A field where intrinsic functions are only legal in string position.
    StringOnly,
}

/// Host seam for expression syntax checking.
///
/// JSONPath/intrinsic/JSONata parsing is a collaborator concern; the
/// validator only forwards expression-typed fields here and anchors any
/// returned code at the field's value span. Implementations must bound
/// their own recursion and fail closed (return `None`) on pathological
/// input.
pub trait ExpressionChecker {
    fn check(&self, kind: ExprKind, text: &str) -> Option<DiagnosticCode>;
}

/// Default checker that accepts every expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllExpressions;

impl ExpressionChecker for AcceptAllExpressions {
    fn check(&self, _kind: ExprKind, _text: &str) -> Option<DiagnosticCode> {
        None
    }
}

/// One schema entry for a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaEntry {
    /// Allowed, value unconstrained.
    Any,
    /// Every element of the array value is validated against the referenced
    /// schema.
    ArrayOf(&'static str),
    /// The value itself is validated against the referenced schema.
    ValueOf(&'static str),
    /// The string value is handed to the [`ExpressionChecker`].
    Expr(ExprKind),
}

/// Allowed properties of one object shape, plus the mutually-exclusive
/// groups it participates in.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    entries: FxHashMap<&'static str, SchemaEntry>,
    groups: Vec<&'static str>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entry(mut self, name: &'static str, entry: SchemaEntry) -> Self {
        self.entries.insert(name, entry);
        self
    }

    #[must_use]
    pub fn allow(self, name: &'static str) -> Self {
        self.entry(name, SchemaEntry::Any)
    }

    #[must_use]
    pub fn allow_all(mut self, names: &[&'static str]) -> Self {
        for name in names {
            self.entries.insert(name, SchemaEntry::Any);
        }
        self
    }

    /// References a mutually-exclusive group by registry id: at most one of
    /// the group's member properties may appear on a conforming object.
    #[must_use]
    pub fn group(mut self, id: &'static str) -> Self {
        self.groups.push(id);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn group_ids(&self) -> &[&'static str] {
        &self.groups
    }
}

/// Which workflow-schema variant applies to a nesting scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowScope {
    /// The top level of the document.
    Root,
    /// A Map state's `Iterator`/`ItemProcessor` sub-workflow.
    MapProcessor,
    /// One entry of a Parallel state's `Branches`.
    Branch,
}

/// The injectable schema configuration: object schemas by id, group schemas
/// by id, and the kind/scope lookup tables.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: FxHashMap<&'static str, ObjectSchema>,
    groups: FxHashMap<&'static str, ObjectSchema>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn schema(&self, id: &str) -> Option<&ObjectSchema> {
        self.schemas.get(id)
    }

    #[must_use]
    pub fn group_schema(&self, id: &str) -> Option<&ObjectSchema> {
        self.groups.get(id)
    }

    #[must_use]
    pub fn insert_schema(mut self, id: &'static str, schema: ObjectSchema) -> Self {
        self.schemas.insert(id, schema);
        self
    }

    #[must_use]
    pub fn insert_group(mut self, id: &'static str, schema: ObjectSchema) -> Self {
        self.groups.insert(id, schema);
        self
    }

    /// Schema for a state of the given kind; `None` (skip conformance) for
    /// placeholders and for kinds a custom registry does not cover.
    #[must_use]
    pub fn state_schema(&self, kind: StateKind) -> Option<&ObjectSchema> {
        let id = match kind {
            StateKind::Pass => "state.pass",
            StateKind::Wait => "state.wait",
            StateKind::Task => "state.task",
            StateKind::Succeed => "state.succeed",
            StateKind::Fail => "state.fail",
            StateKind::Choice => "state.choice",
            StateKind::Map => "state.map",
            StateKind::Parallel => "state.parallel",
            StateKind::Placeholder => return None,
        };
        self.schemas.get(id)
    }

    /// Workflow-level schema variant for a nesting scope.
    #[must_use]
    pub fn workflow_schema(&self, scope: WorkflowScope) -> Option<&ObjectSchema> {
        let id = match scope {
            WorkflowScope::Root => "workflow.root",
            WorkflowScope::MapProcessor => "workflow.map",
            WorkflowScope::Branch => "workflow.branch",
        };
        self.schemas.get(id)
    }

    /// The shipped ASL tables.
    #[must_use]
    pub fn default_asl() -> Self {
        use SchemaEntry::{ArrayOf, Expr, ValueOf};

        let base = || {
            ObjectSchema::new()
                .allow_all(&["Type", "Comment", "QueryLanguage"])
        };
        let io = |schema: ObjectSchema| {
            schema
                .entry("InputPath", Expr(ExprKind::JsonPath))
                .entry("OutputPath", Expr(ExprKind::JsonPath))
        };
        let chaining = |schema: ObjectSchema| {
            schema.allow_all(&["Next", "End", "Assign", "Output"])
        };

        let comparisons = {
            let mut group = ObjectSchema::new().allow_all(&[
                "StringEquals",
                "StringLessThan",
                "StringGreaterThan",
                "StringLessThanEquals",
                "StringGreaterThanEquals",
                "StringMatches",
                "NumericEquals",
                "NumericLessThan",
                "NumericGreaterThan",
                "NumericLessThanEquals",
                "NumericGreaterThanEquals",
                "BooleanEquals",
                "TimestampEquals",
                "TimestampLessThan",
                "TimestampGreaterThan",
                "TimestampLessThanEquals",
                "TimestampGreaterThanEquals",
                "IsNull",
                "IsPresent",
                "IsNumeric",
                "IsString",
                "IsBoolean",
                "IsTimestamp",
                "Condition",
            ]);
            for path_variant in [
                "StringEqualsPath",
                "StringLessThanPath",
                "StringGreaterThanPath",
                "StringLessThanEqualsPath",
                "StringGreaterThanEqualsPath",
                "NumericEqualsPath",
                "NumericLessThanPath",
                "NumericGreaterThanPath",
                "NumericLessThanEqualsPath",
                "NumericGreaterThanEqualsPath",
                "BooleanEqualsPath",
                "TimestampEqualsPath",
                "TimestampLessThanPath",
                "TimestampGreaterThanPath",
                "TimestampLessThanEqualsPath",
                "TimestampGreaterThanEqualsPath",
            ] {
                group = group.entry(path_variant, Expr(ExprKind::JsonPath));
            }
            group
                .entry("And", ArrayOf("rule.choice.nested"))
                .entry("Or", ArrayOf("rule.choice.nested"))
                .entry("Not", ValueOf("rule.choice.nested"))
        };

        Self::empty()
            .insert_group("wait.duration", {
                ObjectSchema::new()
                    .allow_all(&["Seconds", "Timestamp"])
                    .entry("SecondsPath", Expr(ExprKind::JsonPath))
                    .entry("TimestampPath", Expr(ExprKind::JsonPath))
            })
            .insert_group("choice.comparison", comparisons)
            .insert_group("map.processor", {
                ObjectSchema::new().allow_all(&["Iterator", "ItemProcessor"])
            })
            .insert_group("map.selector", {
                ObjectSchema::new().allow_all(&["Parameters", "ItemSelector"])
            })
            .insert_schema("workflow.root", {
                ObjectSchema::new().allow_all(&[
                    "Comment",
                    "StartAt",
                    "States",
                    "Version",
                    "TimeoutSeconds",
                    "QueryLanguage",
                ])
            })
            .insert_schema("workflow.map", {
                ObjectSchema::new()
                    .allow_all(&["Comment", "StartAt", "States"])
                    .entry("ProcessorConfig", ValueOf("processor.config"))
            })
            .insert_schema("workflow.branch", {
                ObjectSchema::new().allow_all(&["Comment", "StartAt", "States"])
            })
            .insert_schema("processor.config", {
                ObjectSchema::new().allow_all(&["Mode", "ExecutionType"])
            })
            .insert_schema("state.pass", {
                chaining(io(base()))
                    .allow_all(&["Result", "Parameters"])
                    .entry("ResultPath", Expr(ExprKind::JsonPath))
            })
            .insert_schema("state.wait", {
                chaining(io(base())).group("wait.duration")
            })
            .insert_schema("state.task", {
                chaining(io(base()))
                    .allow_all(&[
                        "Resource",
                        "Arguments",
                        "Credentials",
                        "Parameters",
                        "ResultSelector",
                        "TimeoutSeconds",
                        "HeartbeatSeconds",
                    ])
                    .entry("ResultPath", Expr(ExprKind::JsonPath))
                    .entry("TimeoutSecondsPath", Expr(ExprKind::JsonPath))
                    .entry("HeartbeatSecondsPath", Expr(ExprKind::JsonPath))
                    .entry("Retry", ArrayOf("rule.retry"))
                    .entry("Catch", ArrayOf("rule.catch"))
            })
            .insert_schema("state.succeed", io(base()).allow("Output"))
            .insert_schema("state.fail", {
                base()
                    .allow_all(&["Error", "Cause"])
                    .entry("ErrorPath", Expr(ExprKind::JsonPath))
                    .entry("CausePath", Expr(ExprKind::JsonPath))
            })
            .insert_schema("state.choice", {
                io(base())
                    .allow_all(&["Default", "Assign", "Output"])
                    .entry("Choices", ArrayOf("rule.choice"))
            })
            .insert_schema("state.map", {
                chaining(io(base()))
                    .group("map.processor")
                    .group("map.selector")
                    .allow_all(&[
                        "Items",
                        "MaxConcurrency",
                        "ItemReader",
                        "ItemBatcher",
                        "ResultWriter",
                        "ResultSelector",
                        "Label",
                        "ToleratedFailureCount",
                        "ToleratedFailurePercentage",
                    ])
                    .entry("ItemsPath", Expr(ExprKind::JsonPath))
                    .entry("MaxConcurrencyPath", Expr(ExprKind::JsonPath))
                    .entry("ToleratedFailureCountPath", Expr(ExprKind::JsonPath))
                    .entry("ToleratedFailurePercentagePath", Expr(ExprKind::JsonPath))
                    .entry("ResultPath", Expr(ExprKind::JsonPath))
                    .entry("Retry", ArrayOf("rule.retry"))
                    .entry("Catch", ArrayOf("rule.catch"))
            })
            .insert_schema("state.parallel", {
                chaining(io(base()))
                    .allow_all(&["Branches", "Parameters", "ResultSelector", "Arguments"])
                    .entry("ResultPath", Expr(ExprKind::JsonPath))
                    .entry("Retry", ArrayOf("rule.retry"))
                    .entry("Catch", ArrayOf("rule.catch"))
            })
            .insert_schema("rule.choice", {
                ObjectSchema::new()
                    .allow_all(&["Next", "Assign", "Comment", "Output"])
                    .entry("Variable", Expr(ExprKind::JsonPath))
                    .group("choice.comparison")
            })
            .insert_schema("rule.choice.nested", {
                // Nested operands of And/Or/Not carry no edge of their own.
                ObjectSchema::new()
                    .allow("Comment")
                    .entry("Variable", Expr(ExprKind::JsonPath))
                    .group("choice.comparison")
            })
            .insert_schema("rule.catch", {
                ObjectSchema::new()
                    .allow_all(&["ErrorEquals", "Next", "Assign", "Comment", "Output"])
                    .entry("ResultPath", Expr(ExprKind::JsonPath))
            })
            .insert_schema("rule.retry", {
                ObjectSchema::new().allow_all(&[
                    "ErrorEquals",
                    "IntervalSeconds",
                    "MaxAttempts",
                    "BackoffRate",
                    "MaxDelaySeconds",
                    "JitterStrategy",
                    "Comment",
                ])
            })
    }
}
