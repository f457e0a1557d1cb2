//! Containment search and derived addressing helpers.

use miette::Diagnostic;
use thiserror::Error;

use crate::definition::{Reference, State, WorkflowDefinition};
use crate::document::Property;

use super::path::{Segment, StatePath};
use super::visit::MAX_NESTING_DEPTH;

/// Contract violations at the addressing API boundary.
///
/// These indicate a caller bug (an already-wrong node was passed in), not a
/// document defect, and therefore fail loudly instead of degrading to a
/// diagnostic.
#[derive(Debug, Error, Diagnostic)]
pub enum AddressError {
    /// The node handed to [`state_names`] is not a `States` property with an
    /// object value.
    #[error("expected a `States` property with an object value, found `{found}`")]
    #[diagnostic(code(statelens::traversal::not_a_states_property))]
    NotAStatesProperty { found: String },
}

/// Result of a successful [`find_state_by_id`] lookup.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub state: &'a State,
    /// The scope whose `States` mapping declares this state.
    pub parent: &'a WorkflowDefinition,
    /// Full path of the state, terminating in its id.
    pub path: StatePath,
    /// `path` without its final segment: the address of the declaring scope.
    pub parent_path: StatePath,
}

/// Finds the first state whose direct key equals `id`.
///
/// The current `States` mapping is scanned first; only then does the search
/// recurse, depth-first in mapping order, into every Map sub-workflow and
/// every Parallel branch. This is a containment search over object nesting —
/// `Next` edges play no part, so cycles cannot occur. Returns `None` when the
/// id is absent anywhere (or hidden below [`MAX_NESTING_DEPTH`]).
#[must_use]
pub fn find_state_by_id<'a>(
    root: &'a WorkflowDefinition,
    id: &str,
    prefix: &StatePath,
) -> Option<Located<'a>> {
    find_in_scope(root, id, prefix, 0)
}

fn find_in_scope<'a>(
    scope: &'a WorkflowDefinition,
    id: &str,
    prefix: &StatePath,
    depth: usize,
) -> Option<Located<'a>> {
    if depth >= MAX_NESTING_DEPTH {
        return None;
    }
    // Direct keys of this mapping take precedence over anything nested.
    for entry in scope.entries() {
        if entry.id == id {
            return Some(Located {
                state: &entry.state,
                parent: scope,
                path: prefix.child(&entry.id),
                parent_path: prefix.clone(),
            });
        }
    }
    for entry in scope.entries() {
        let path = prefix.child(&entry.id);
        if let Some(processor) = entry.state.processor() {
            if let Some(found) = find_in_scope(&processor.workflow, id, &path, depth + 1) {
                return Some(found);
            }
        }
        for (index, branch) in entry.state.branches().iter().enumerate() {
            if let Some(found) = find_in_scope(branch, id, &path.branch(index), depth + 1) {
                return Some(found);
            }
        }
    }
    None
}

/// Resolves a [`StatePath`] to the state it addresses, along with the scope
/// that declares it. Returns `None` for paths that do not address a state in
/// this document.
#[must_use]
pub fn state_at<'a>(
    root: &'a WorkflowDefinition,
    path: &StatePath,
) -> Option<(&'a State, &'a WorkflowDefinition)> {
    let mut scope = root;
    let mut segments = path.segments().iter().peekable();
    while let Some(segment) = segments.next() {
        let Segment::State(id) = segment else {
            return None;
        };
        let state = scope.state(id)?;
        if segments.peek().is_none() {
            return Some((state, scope));
        }
        scope = match segments.peek() {
            Some(Segment::Branch(index)) => {
                segments.next();
                // A trailing branch index addresses a scope, not a state.
                segments.peek()?;
                state.branches().get(*index)?
            }
            _ => &state.processor()?.workflow,
        };
    }
    None
}

/// All descendant state ids of the state addressed by `id`, at any depth,
/// in the same preorder as [`visit_all_states`](super::visit_all_states).
/// Empty when the id is unknown or the state nests nothing.
#[must_use]
pub fn all_children(root: &WorkflowDefinition, id: &str) -> Vec<String> {
    let Some(located) = find_state_by_id(root, id, &StatePath::root()) else {
        return Vec::new();
    };
    let mut ids = Vec::new();
    if let Some(processor) = located.state.processor() {
        collect_ids(&processor.workflow, &mut ids, 0);
    }
    for branch in located.state.branches() {
        collect_ids(branch, &mut ids, 0);
    }
    ids
}

fn collect_ids(scope: &WorkflowDefinition, ids: &mut Vec<String>, depth: usize) {
    if depth >= MAX_NESTING_DEPTH {
        return;
    }
    for entry in scope.entries() {
        ids.push(entry.id.clone());
        if let Some(processor) = entry.state.processor() {
            collect_ids(&processor.workflow, ids, depth + 1);
        }
        for branch in entry.state.branches() {
            collect_ids(branch, ids, depth + 1);
        }
    }
}

/// The single forward-edge target used for basic chaining.
///
/// Terminal states chain nowhere. For Choice this is `Default` if present,
/// else the first rule's `Next` — callers building a full edge set must walk
/// every rule via [`State::outgoing_edges`] instead.
#[must_use]
pub fn direct_next(state: &State) -> Option<&Reference> {
    if state.is_terminal() {
        return None;
    }
    if let crate::definition::StateBody::Choice { rules, default } = &state.body {
        return default
            .as_ref()
            .or_else(|| rules.iter().find_map(|rule| rule.next.as_ref()));
    }
    state.next.as_ref()
}

/// Controls which keys count during state-name enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameListOptions {
    /// Count keys that have no explicit key/value separator yet. A YAML
    /// document mid-edit transiently lacks the `:` on the line being typed;
    /// completion hosts usually want such keys included, validation hosts
    /// usually do not.
    pub include_separator_less: bool,
}

/// Enumerates the state names declared under a `States` property.
///
/// # Errors
///
/// Returns [`AddressError::NotAStatesProperty`] when `property` is not a
/// `States` key with an object value — a caller contract violation, not a
/// document defect.
pub fn state_names(
    property: &Property,
    options: NameListOptions,
) -> Result<Vec<String>, AddressError> {
    if property.key.name != "States" {
        return Err(AddressError::NotAStatesProperty {
            found: property.key.name.clone(),
        });
    }
    let Some(entries) = property.value.as_object() else {
        return Err(AddressError::NotAStatesProperty {
            found: format!("{} (non-object value)", property.key.name),
        });
    };
    Ok(entries
        .iter()
        .filter(|p| p.key.has_separator || options.include_separator_less)
        .map(|p| p.key.name.clone())
        .collect())
}
