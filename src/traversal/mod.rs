//! Graph addressing and depth-first visitation.
//!
//! Everything else in the engine is built on the primitives in this module:
//!
//! - [`StatePath`] — canonical address of a state at any nesting depth,
//!   mixing state-id and branch-index segments
//! - [`find_state_by_id`] — containment search for the first state with a
//!   given id, current mapping first, then depth-first into Map
//!   sub-workflows and Parallel branches in mapping order
//! - [`visit_all_states`] — preorder depth-first visitor with *global*
//!   early-stop semantics: [`Flow::Stop`] unwinds out of every enclosing
//!   recursion frame, not just the current sibling list
//! - [`all_children`] / [`direct_next`] — derived addressing helpers
//! - [`state_names`] — state-name enumeration of a `States` property with
//!   the separator-less configuration flag for mid-edit YAML
//!
//! Containment search follows object nesting, never `Next` edges, so no
//! cycle protection is needed. Recursion is still capped at
//! [`MAX_NESTING_DEPTH`] to fail closed on pathological documents.
//!
//! # Examples
//!
//! ```
//! use statelens::definition::WorkflowDefinition;
//! use statelens::document::DocNode;
//! use statelens::traversal::{Flow, StatePath, find_state_by_id, visit_all_states};
//!
//! let wf = WorkflowDefinition::from_node(&DocNode::from_json(&serde_json::json!({
//!     "StartAt": "A",
//!     "States": {
//!         "A": {"Type": "Pass", "Next": "B"},
//!         "B": {"Type": "Pass", "End": true}
//!     }
//! })));
//!
//! let located = find_state_by_id(&wf, "B", &StatePath::root()).unwrap();
//! assert_eq!(located.path.to_string(), "B");
//!
//! let mut visited = Vec::new();
//! visit_all_states(&wf, &mut |id, _, _, _| {
//!     visited.push(id.to_string());
//!     Flow::Continue
//! });
//! assert_eq!(visited, vec!["A", "B"]);
//! ```

mod find;
mod path;
mod visit;

#[cfg(test)]
mod tests;

pub use find::{
    AddressError, Located, NameListOptions, all_children, direct_next, find_state_by_id,
    state_at, state_names,
};
pub use path::{Segment, StatePath};
pub use visit::{Flow, MAX_NESTING_DEPTH, visit_all_states};
