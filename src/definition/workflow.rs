//! Workflow scopes: `StartAt` plus an ordered `States` mapping.

use crate::document::{DocNode, Span};

use super::state::{Reference, State};

/// One `id: state` entry of a `States` mapping, with the span of the id key.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub id: String,
    pub id_span: Span,
    pub state: State,
}

/// An ordered `States` mapping together with the span of the `States` key
/// itself (diagnostic anchor for scope-level findings).
#[derive(Debug, Clone, PartialEq)]
pub struct StatesMap {
    pub key_span: Span,
    pub entries: Vec<StateEntry>,
}

impl StatesMap {
    /// Looks a sibling state up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&State> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.state)
    }

    /// Whether `id` is declared in this mapping.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One workflow scope: the top level of a document, a Map sub-workflow, or a
/// Parallel branch.
///
/// A definition with no `States` is a valid, empty scope. The value is
/// immutable; hosts rebuild it from the document on every edit.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDefinition {
    pub start_at: Option<Reference>,
    pub states: Option<StatesMap>,
    pub comment: Option<String>,
    /// The annotated object node this scope was built from; the schema
    /// validator walks it for workflow-level property checks.
    pub raw: DocNode,
}

impl WorkflowDefinition {
    /// Builds a scope from its annotated object node. Lenient: anything
    /// missing or malformed is simply absent.
    #[must_use]
    pub fn from_node(node: &DocNode) -> Self {
        let start_at = node.get("StartAt").and_then(|n| {
            n.as_str().map(|target| Reference {
                target: target.to_string(),
                span: n.span,
            })
        });
        let states = node.property("States").and_then(|property| {
            property.value.as_object().map(|props| StatesMap {
                key_span: property.key.span,
                entries: props
                    .iter()
                    .filter(|p| p.value.is_object())
                    .map(|p| StateEntry {
                        id: p.key.name.clone(),
                        id_span: p.key.span,
                        state: State::from_node(&p.value),
                    })
                    .collect(),
            })
        });
        Self {
            start_at,
            states,
            comment: node
                .get("Comment")
                .and_then(DocNode::as_str)
                .map(str::to_string),
            raw: node.clone(),
        }
    }

    /// Entries of the `States` mapping, or an empty slice for an empty scope.
    #[must_use]
    pub fn entries(&self) -> &[StateEntry] {
        self.states
            .as_ref()
            .map(|states| states.entries.as_slice())
            .unwrap_or_default()
    }

    /// Looks a state up by id in this scope only (no recursion).
    #[must_use]
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.as_ref()?.get(id)
    }
}
