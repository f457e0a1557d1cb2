//! State kinds, kind-specific payloads, and forward-edge enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::{DocNode, Span};

use super::workflow::WorkflowDefinition;

/// Discriminator over the fixed set of ASL state kinds.
///
/// `Placeholder` covers states whose `Type` is missing or not one of the
/// known kinds — a routine situation while a document is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    Pass,
    Wait,
    Task,
    Succeed,
    Fail,
    Choice,
    Map,
    Parallel,
    Placeholder,
}

impl StateKind {
    /// Maps a `Type` field value to a kind; anything unrecognized (or a
    /// missing field) is a [`StateKind::Placeholder`].
    #[must_use]
    pub fn from_type_field(value: Option<&str>) -> Self {
        match value {
            Some("Pass") => Self::Pass,
            Some("Wait") => Self::Wait,
            Some("Task") => Self::Task,
            Some("Succeed") => Self::Succeed,
            Some("Fail") => Self::Fail,
            Some("Choice") => Self::Choice,
            Some("Map") => Self::Map,
            Some("Parallel") => Self::Parallel,
            _ => Self::Placeholder,
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pass => "Pass",
            Self::Wait => "Wait",
            Self::Task => "Task",
            Self::Succeed => "Succeed",
            Self::Fail => "Fail",
            Self::Choice => "Choice",
            Self::Map => "Map",
            Self::Parallel => "Parallel",
            Self::Placeholder => "Placeholder",
        };
        write!(f, "{name}")
    }
}

/// A by-id forward reference (`StartAt`, `Next`, `Default`, rule `Next`)
/// together with the span of the referencing string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub target: String,
    pub span: Span,
}

impl Reference {
    fn from_node(node: &DocNode) -> Option<Self> {
        Some(Self {
            target: node.as_str()?.to_string(),
            span: node.span,
        })
    }
}

/// One entry of a Choice state's `Choices` array.
///
/// The rule's condition operators are left raw; the validator checks them
/// against the composite choice-rule schema. Only the pieces that carry
/// graph semantics are lifted out: the rule's own `Next` edge and the
/// `Assign` bindings that ride that specific edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRule {
    pub next: Option<Reference>,
    pub assign: Option<DocNode>,
    pub raw: DocNode,
}

/// One entry of a `Catch` array on Task/Map/Parallel states.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchRule {
    pub next: Option<Reference>,
    pub assign: Option<DocNode>,
    pub raw: DocNode,
}

/// Which literal field name declared a Map's sub-workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessorField {
    /// Legacy field name.
    Iterator,
    /// Current field name.
    ItemProcessor,
}

impl ProcessorField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iterator => "Iterator",
            Self::ItemProcessor => "ItemProcessor",
        }
    }
}

/// Which literal field name declared a Map's per-item input selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorField {
    /// Legacy field name.
    Parameters,
    /// Current field name.
    ItemSelector,
}

impl SelectorField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parameters => "Parameters",
            Self::ItemSelector => "ItemSelector",
        }
    }
}

/// Execution mode of a Map state's sub-workflow.
///
/// `Distributed` executions are isolated from the parent variable scope;
/// `Inline` executions share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapMode {
    #[default]
    Inline,
    Distributed,
}

/// A Map state's nested sub-workflow in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct Processor {
    /// Which literal field name was present in the document.
    pub field: ProcessorField,
    pub mode: MapMode,
    pub workflow: WorkflowDefinition,
}

/// A Map state's item-selection payload in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Which literal field name was present in the document.
    pub field: SelectorField,
    pub node: DocNode,
}

/// Map-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MapBody {
    /// Absent while the document is mid-edit; the invariant that exactly one
    /// of `Iterator`/`ItemProcessor` is present is the validator's to check.
    pub processor: Option<Processor>,
    pub selector: Option<Selector>,
}

/// Kind-specific payload of a [`State`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateBody {
    Pass,
    Wait,
    Task,
    Succeed,
    Fail,
    Choice {
        rules: Vec<ChoiceRule>,
        default: Option<Reference>,
    },
    Map(MapBody),
    Parallel {
        branches: Vec<WorkflowDefinition>,
    },
    Placeholder,
}

/// Classifies a forward edge by the field it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// The state's own `Next` field.
    Next,
    /// A Choice state's `Default` field.
    Default,
    /// The `Next` of the choice rule at this index.
    Rule(usize),
    /// The `Next` of the catch rule at this index.
    Catch(usize),
}

/// One forward edge of a state, with the `Assign` payload that rides it.
///
/// `Assign` bindings are edge-specific: a state-level `Assign` applies on the
/// plain `Next` edge and on a Choice's `Default` edge, while each choice or
/// catch rule carries its own. The scope resolver relies on this split to
/// attribute bindings to the exact edge taken.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub kind: EdgeKind,
    pub reference: &'a Reference,
    pub assign: Option<&'a DocNode>,
}

/// One state of a `States` mapping.
///
/// Common fields shared across kinds live here; the kind-specific payload is
/// in [`StateBody`]. `raw` keeps the annotated object node for the schema
/// validator, which must see every declared property with its key span.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub kind: StateKind,
    pub next: Option<Reference>,
    pub end: bool,
    pub assign: Option<DocNode>,
    pub catch: Vec<CatchRule>,
    pub retry: Vec<DocNode>,
    pub body: StateBody,
    pub raw: DocNode,
}

impl State {
    /// Builds a state from its annotated object node. Never fails; malformed
    /// pieces degrade to `None`/`Placeholder`.
    #[must_use]
    pub fn from_node(node: &DocNode) -> Self {
        let kind = StateKind::from_type_field(node.get("Type").and_then(DocNode::as_str));
        let body = match kind {
            StateKind::Pass => StateBody::Pass,
            StateKind::Wait => StateBody::Wait,
            StateKind::Task => StateBody::Task,
            StateKind::Succeed => StateBody::Succeed,
            StateKind::Fail => StateBody::Fail,
            StateKind::Choice => StateBody::Choice {
                rules: parse_choice_rules(node),
                default: node.get("Default").and_then(Reference::from_node),
            },
            StateKind::Map => StateBody::Map(parse_map_body(node)),
            StateKind::Parallel => StateBody::Parallel {
                branches: parse_branches(node),
            },
            StateKind::Placeholder => StateBody::Placeholder,
        };
        Self {
            kind,
            next: node.get("Next").and_then(Reference::from_node),
            end: node.get("End").and_then(DocNode::as_bool).unwrap_or(false),
            assign: node.get("Assign").cloned(),
            catch: parse_catch_rules(node),
            retry: node
                .get("Retry")
                .and_then(DocNode::as_array)
                .map(<[DocNode]>::to_vec)
                .unwrap_or_default(),
            body,
            raw: node.clone(),
        }
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, StateKind::Choice)
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self.kind, StateKind::Map)
    }

    #[must_use]
    pub fn is_parallel(&self) -> bool {
        matches!(self.kind, StateKind::Parallel)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, StateKind::Placeholder)
    }

    /// A state is terminal if it ends its scope: `End: true`, Succeed, or
    /// Fail.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.end || matches!(self.kind, StateKind::Succeed | StateKind::Fail)
    }

    /// Whether this kind may bind variables via `Assign`.
    #[must_use]
    pub fn supports_assign(&self) -> bool {
        !matches!(self.kind, StateKind::Succeed | StateKind::Fail)
    }

    /// Canonical view of a Map state's sub-workflow, regardless of whether it
    /// was declared as `Iterator` or `ItemProcessor`.
    #[must_use]
    pub fn processor(&self) -> Option<&Processor> {
        match &self.body {
            StateBody::Map(map) => map.processor.as_ref(),
            _ => None,
        }
    }

    /// Which literal processor field the document used.
    #[must_use]
    pub fn processor_field(&self) -> Option<ProcessorField> {
        self.processor().map(|p| p.field)
    }

    /// Canonical view of a Map state's item selection (`Parameters` or
    /// `ItemSelector`).
    #[must_use]
    pub fn selector(&self) -> Option<&Selector> {
        match &self.body {
            StateBody::Map(map) => map.selector.as_ref(),
            _ => None,
        }
    }

    /// A Map state's execution mode; `None` for non-Map states or a Map with
    /// no processor yet.
    #[must_use]
    pub fn map_mode(&self) -> Option<MapMode> {
        self.processor().map(|p| p.mode)
    }

    /// A Parallel state's branches; empty for every other kind.
    #[must_use]
    pub fn branches(&self) -> &[WorkflowDefinition] {
        match &self.body {
            StateBody::Parallel { branches } => branches,
            _ => &[],
        }
    }

    /// All forward edges of this state, with the `Assign` payload attached to
    /// each specific edge.
    ///
    /// For a Choice state these are each rule's `Next` (with the rule's own
    /// `Assign`) plus `Default` (with the state-level `Assign`); for every
    /// other kind the plain `Next` (state-level `Assign`) plus each catch
    /// rule's `Next` (rule-level `Assign`). States that cannot bind variables
    /// contribute edges with no `Assign`.
    #[must_use]
    pub fn outgoing_edges(&self) -> Vec<Edge<'_>> {
        let mut edges = Vec::new();
        let state_assign = if self.supports_assign() {
            self.assign.as_ref()
        } else {
            None
        };
        if let StateBody::Choice { rules, default } = &self.body {
            for (index, rule) in rules.iter().enumerate() {
                if let Some(reference) = &rule.next {
                    edges.push(Edge {
                        kind: EdgeKind::Rule(index),
                        reference,
                        assign: rule.assign.as_ref(),
                    });
                }
            }
            if let Some(reference) = default {
                edges.push(Edge {
                    kind: EdgeKind::Default,
                    reference,
                    assign: state_assign,
                });
            }
        } else if let Some(reference) = &self.next {
            edges.push(Edge {
                kind: EdgeKind::Next,
                reference,
                assign: state_assign,
            });
        }
        for (index, rule) in self.catch.iter().enumerate() {
            if let Some(reference) = &rule.next {
                edges.push(Edge {
                    kind: EdgeKind::Catch(index),
                    reference,
                    assign: rule.assign.as_ref(),
                });
            }
        }
        edges
    }
}

fn parse_choice_rules(node: &DocNode) -> Vec<ChoiceRule> {
    node.get("Choices")
        .and_then(DocNode::as_array)
        .map(|rules| {
            rules
                .iter()
                .map(|rule| ChoiceRule {
                    next: rule.get("Next").and_then(Reference::from_node),
                    assign: rule.get("Assign").cloned(),
                    raw: rule.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_catch_rules(node: &DocNode) -> Vec<CatchRule> {
    node.get("Catch")
        .and_then(DocNode::as_array)
        .map(|rules| {
            rules
                .iter()
                .map(|rule| CatchRule {
                    next: rule.get("Next").and_then(Reference::from_node),
                    assign: rule.get("Assign").cloned(),
                    raw: rule.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_map_body(node: &DocNode) -> MapBody {
    // First declared field wins when both generations are present; the
    // schema validator reports the duplication.
    let processor = [
        ("ItemProcessor", ProcessorField::ItemProcessor),
        ("Iterator", ProcessorField::Iterator),
    ]
    .into_iter()
    .find_map(|(name, field)| {
        let sub = node.get(name)?;
        sub.is_object().then(|| Processor {
            field,
            mode: parse_map_mode(sub),
            workflow: WorkflowDefinition::from_node(sub),
        })
    });
    let selector = [
        ("ItemSelector", SelectorField::ItemSelector),
        ("Parameters", SelectorField::Parameters),
    ]
    .into_iter()
    .find_map(|(name, field)| {
        node.get(name).map(|value| Selector {
            field,
            node: value.clone(),
        })
    });
    MapBody {
        processor,
        selector,
    }
}

fn parse_map_mode(processor_node: &DocNode) -> MapMode {
    let mode = processor_node
        .get("ProcessorConfig")
        .and_then(|config| config.get("Mode"))
        .and_then(DocNode::as_str);
    match mode {
        Some("DISTRIBUTED") => MapMode::Distributed,
        _ => MapMode::Inline,
    }
}

fn parse_branches(node: &DocNode) -> Vec<WorkflowDefinition> {
    node.get("Branches")
        .and_then(DocNode::as_array)
        .map(|branches| {
            branches
                .iter()
                .filter(|branch| branch.is_object())
                .map(WorkflowDefinition::from_node)
                .collect()
        })
        .unwrap_or_default()
}
