//! Reverse-adjacency index over forward edges, one table per nesting scope.

use rustc_hash::FxHashMap;

use crate::definition::WorkflowDefinition;
use crate::document::DocNode;
use crate::traversal::{MAX_NESTING_DEPTH, StatePath};

/// Predecessors of one scope's states: successor id to predecessor id to the
/// `Assign` payloads riding each edge between that pair. Two edges between
/// the same pair (two Catch rules, say) keep both payloads.
type ScopeTable = FxHashMap<String, FxHashMap<String, Vec<DocNode>>>;

/// Reverse-adjacency index for a whole document.
///
/// State ids are only unique within their own `States` mapping, so tables are
/// keyed by the declaring scope's [`StatePath`]. Built wholesale from the
/// definition; the analyzer swaps a finished index in atomically so resolver
/// calls never see a partial build.
#[derive(Debug, Default)]
pub struct ReverseAdjacency {
    scopes: FxHashMap<StatePath, ScopeTable>,
}

impl ReverseAdjacency {
    /// Builds the full index by walking every scope once.
    #[must_use]
    pub fn build(root: &WorkflowDefinition) -> Self {
        let mut adjacency = Self::default();
        adjacency.index_scope(root, &StatePath::root(), 0);
        tracing::debug!(scopes = adjacency.scopes.len(), "reverse adjacency built");
        adjacency
    }

    /// Predecessor table for `succ` within the scope at `scope_path`, or
    /// `None` when nothing points at it.
    #[must_use]
    pub fn predecessors(
        &self,
        scope_path: &StatePath,
        succ: &str,
    ) -> Option<&FxHashMap<String, Vec<DocNode>>> {
        self.scopes.get(scope_path)?.get(succ)
    }

    fn index_scope(&mut self, scope: &WorkflowDefinition, path: &StatePath, depth: usize) {
        if depth >= MAX_NESTING_DEPTH {
            return;
        }
        for entry in scope.entries() {
            for edge in entry.state.outgoing_edges() {
                let assigns = self
                    .scopes
                    .entry(path.clone())
                    .or_default()
                    .entry(edge.reference.target.clone())
                    .or_default()
                    .entry(entry.id.clone())
                    .or_default();
                if let Some(assign) = edge.assign {
                    assigns.push(assign.clone());
                }
            }
            let state_path = path.child(&entry.id);
            if let Some(processor) = entry.state.processor() {
                self.index_scope(&processor.workflow, &state_path, depth + 1);
            }
            for (index, branch) in entry.state.branches().iter().enumerate() {
                self.index_scope(branch, &state_path.branch(index), depth + 1);
            }
        }
    }
}
