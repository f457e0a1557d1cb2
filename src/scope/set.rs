//! Nested-key trees describing which variable names are bound.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{DocNode, DocValue};

/// Placeholder key a completion host inserts at the cursor while the user is
/// still typing. It is never a real binding and is stripped at every nesting
/// level.
pub const EDITING_SENTINEL: &str = "$__editing__";

/// Shape of one bound value. Values are discarded during resolution; only
/// the nested key structure survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeShape {
    /// A primitive binding. Nothing to descend into.
    Presence,
    /// An object binding with its own nested names.
    Object(ScopeSet),
    /// An array binding, element shapes kept positionally.
    Array(Vec<ScopeShape>),
}

/// An ordered set of bound variable names, each with its value shape.
///
/// Backed by a `BTreeMap` so hosts rendering completions get a stable,
/// lexicographic order without sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSet(BTreeMap<String, ScopeShape>);

impl ScopeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScopeShape> {
        self.0.get(name)
    }

    /// Bound names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Reduces an `Assign` payload to its key shape.
    ///
    /// Only object payloads bind anything; every other node yields an empty
    /// set. The editing sentinel is stripped at every level, and a duplicate
    /// key keeps its first shape.
    #[must_use]
    pub fn from_assign(node: &DocNode) -> Self {
        let mut set = Self::new();
        if let Some(props) = node.as_object() {
            for prop in props {
                if prop.key.name == EDITING_SENTINEL {
                    continue;
                }
                set.0
                    .entry(prop.key.name.clone())
                    .or_insert_with(|| shape_of(&prop.value));
            }
        }
        set
    }

    /// Folds `other` into `self`. On a name collision the binding already
    /// present wins; precedence between predecessors is a traversal-order
    /// artifact, not a guarantee.
    pub fn merge(&mut self, other: Self) {
        for (name, shape) in other.0 {
            self.0.entry(name).or_insert(shape);
        }
    }
}

fn shape_of(node: &DocNode) -> ScopeShape {
    match &node.value {
        DocValue::Object(_) => ScopeShape::Object(ScopeSet::from_assign(node)),
        DocValue::Array(items) => ScopeShape::Array(items.iter().map(shape_of).collect()),
        _ => ScopeShape::Presence,
    }
}
