//! Backward data-flow resolution of variable scopes.

use rustc_hash::FxHashSet;

use serde::{Deserialize, Serialize};

use crate::definition::{MapMode, WorkflowDefinition};
use crate::traversal::{MAX_NESTING_DEPTH, Segment, StatePath, find_state_by_id, state_at};

use super::adjacency::ReverseAdjacency;
use super::set::ScopeSet;

/// The bindings visible at a state, split by where they were bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableScopes {
    /// Bindings from states that provably execute earlier in the same
    /// `States` mapping.
    pub local: ScopeSet,
    /// Bindings inherited from enclosing scopes, when the nesting boundary
    /// permits inheritance.
    pub outer: ScopeSet,
}

impl VariableScopes {
    /// Local and outer folded into one set. Local bindings shadow outer ones
    /// on a name collision.
    #[must_use]
    pub fn combined(&self) -> ScopeSet {
        let mut combined = self.local.clone();
        combined.merge(self.outer.clone());
        combined
    }
}

/// Resolves the variable scopes visible at the state named `id`.
///
/// The state is located by containment search, so the first declaration of a
/// duplicated id (current mapping before nested scopes) is the one resolved.
/// A nonexistent id yields empty scopes rather than an error.
#[must_use]
pub fn resolve_scopes(
    root: &WorkflowDefinition,
    adjacency: &ReverseAdjacency,
    id: &str,
) -> VariableScopes {
    let Some(located) = find_state_by_id(root, id, &StatePath::root()) else {
        tracing::trace!(id, "scope request for unknown state");
        return VariableScopes::default();
    };
    resolve_at(root, adjacency, &located.path, 0)
}

/// Resolves the scopes of the state addressed by `path`, recursing upward
/// through the enclosing scopes.
fn resolve_at(
    root: &WorkflowDefinition,
    adjacency: &ReverseAdjacency,
    path: &StatePath,
    depth: usize,
) -> VariableScopes {
    let Some(Segment::State(target)) = path.last() else {
        return VariableScopes::default();
    };
    let scope_path = path.parent();
    let local = local_scope(adjacency, &scope_path, target);
    let outer = outer_scope(root, adjacency, &scope_path, depth);
    VariableScopes { local, outer }
}

/// Backward worklist over the scope's reverse adjacency.
///
/// Visited `(predecessor, successor)` edge pairs bound the traversal, so a
/// manual loop is walked at most once per edge, while the same predecessor
/// may still contribute different bindings toward two distinct successors.
/// Only the `Assign` payloads riding the specific edge into the successor
/// under exploration count.
fn local_scope(adjacency: &ReverseAdjacency, scope_path: &StatePath, target: &str) -> ScopeSet {
    let mut local = ScopeSet::new();
    let mut visited: FxHashSet<(String, String)> = FxHashSet::default();
    let mut stack = vec![target.to_string()];
    while let Some(succ) = stack.pop() {
        let Some(preds) = adjacency.predecessors(scope_path, &succ) else {
            continue;
        };
        for (pred, assigns) in preds {
            if visited.insert((pred.clone(), succ.clone())) {
                for assign in assigns {
                    local.merge(ScopeSet::from_assign(assign));
                }
                stack.push(pred.clone());
            }
        }
    }
    local
}

/// Bindings inherited from the scopes enclosing `scope_path`.
///
/// The enclosing search re-targets the owning Map or Parallel state one
/// level up and folds that state's combined scopes in, so everything bound
/// before the owning state (and everything it inherits itself) flows down.
/// Two bindings never leak through this path: a Distributed Map's items run
/// isolated, and the owning state's own `Assign` only rides its outgoing
/// edges, which the upward re-target never traverses.
fn outer_scope(
    root: &WorkflowDefinition,
    adjacency: &ReverseAdjacency,
    scope_path: &StatePath,
    depth: usize,
) -> ScopeSet {
    if scope_path.is_root() || depth >= MAX_NESTING_DEPTH {
        return ScopeSet::new();
    }
    let owning_path = match scope_path.last() {
        Some(Segment::Branch(_)) => scope_path.parent(),
        _ => scope_path.clone(),
    };
    // A scope path ending in a state id is a Map processor; one ending in a
    // branch index is a Parallel branch, which always inherits.
    let distributed = matches!(scope_path.last(), Some(Segment::State(_)))
        && state_at(root, &owning_path)
            .is_some_and(|(state, _)| state.map_mode() == Some(MapMode::Distributed));
    if distributed {
        tracing::trace!(scope = %scope_path, "distributed boundary, outer scope empty");
        return ScopeSet::new();
    }
    resolve_at(root, adjacency, &owning_path, depth + 1).combined()
}
