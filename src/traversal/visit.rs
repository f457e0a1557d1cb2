//! Preorder depth-first visitation with global early stop.

use crate::definition::{State, WorkflowDefinition};

use super::path::StatePath;

/// Cap on addressing recursion depth. Documents nested deeper than this are
/// treated as if the excess levels were absent (fail closed), so a
/// pathological or malformed document cannot drive unbounded recursion.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Visitor verdict: keep going, or stop the whole traversal.
///
/// `Stop` is global: it unwinds out of every enclosing Map/Parallel
/// recursion frame and no further state is visited anywhere in the
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    #[must_use]
    pub fn is_stop(&self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// Visits every state of `root` in preorder, depth-first, in mapping order.
///
/// The visitor receives the state's id, the state, the scope that declares
/// it, and its full [`StatePath`]. Returning [`Flow::Stop`] ends the
/// traversal globally; the function's return value reports whether that
/// happened.
///
/// After visiting a Map state the traversal descends into its sub-workflow
/// with the path extended by the state id; after a Parallel state it
/// descends into each branch with the path extended by the state id and the
/// branch index.
pub fn visit_all_states<F>(root: &WorkflowDefinition, visitor: &mut F) -> Flow
where
    F: FnMut(&str, &State, &WorkflowDefinition, &StatePath) -> Flow,
{
    visit_scope(root, &StatePath::root(), visitor, 0)
}

fn visit_scope<F>(
    scope: &WorkflowDefinition,
    prefix: &StatePath,
    visitor: &mut F,
    depth: usize,
) -> Flow
where
    F: FnMut(&str, &State, &WorkflowDefinition, &StatePath) -> Flow,
{
    if depth >= MAX_NESTING_DEPTH {
        tracing::trace!(depth, "nesting depth cap reached, skipping subtree");
        return Flow::Continue;
    }
    for entry in scope.entries() {
        let path = prefix.child(&entry.id);
        if visitor(&entry.id, &entry.state, scope, &path).is_stop() {
            return Flow::Stop;
        }
        if let Some(processor) = entry.state.processor() {
            if visit_scope(&processor.workflow, &path, visitor, depth + 1).is_stop() {
                return Flow::Stop;
            }
        }
        for (index, branch) in entry.state.branches().iter().enumerate() {
            if visit_scope(branch, &path.branch(index), visitor, depth + 1).is_stop() {
                return Flow::Stop;
            }
        }
    }
    Flow::Continue
}
