//! Variable scope resolution.
//!
//! ASL states bind variables with `Assign`; a binding becomes visible to the
//! states downstream of the edge it rides. For a completion host the
//! interesting question runs backward: at this state, which names are
//! guaranteed bound? The resolver answers it with a backward worklist
//! traversal over a prebuilt [`ReverseAdjacency`] index, splitting the answer
//! into bindings from earlier states in the same `States` mapping
//! ([`VariableScopes::local`]) and bindings inherited from enclosing scopes
//! ([`VariableScopes::outer`]).
//!
//! `Assign` attribution is edge-specific: a Choice rule's `Assign` counts
//! only along that rule's edge, a Catch rule's only along its own, and the
//! state-level `Assign` rides the plain `Next` and Choice `Default` edges.
//! Nesting boundaries follow execution semantics: Inline Map sub-workflows
//! and Parallel branches inherit the parent scope, Distributed Map items see
//! nothing from outside, and a Map's own `Assign` (bound only once the whole
//! Map completes) is never visible inside its sub-workflow.
//!
//! Values are discarded on the way: the output is a nested-key tree
//! ([`ScopeSet`]) with primitives reduced to bare presence.
//!
//! # Examples
//!
//! ```
//! use statelens::definition::WorkflowDefinition;
//! use statelens::document::DocNode;
//! use statelens::scope::{ReverseAdjacency, resolve_scopes};
//!
//! let root = WorkflowDefinition::from_node(&DocNode::from_json(&serde_json::json!({
//!     "StartAt": "Init",
//!     "States": {
//!         "Init": {"Type": "Pass", "Assign": {"retries": 0}, "Next": "Work"},
//!         "Work": {"Type": "Task", "Resource": "arn:example", "End": true}
//!     }
//! })));
//!
//! let adjacency = ReverseAdjacency::build(&root);
//! let scopes = resolve_scopes(&root, &adjacency, "Work");
//! assert!(scopes.local.contains("retries"));
//! assert!(scopes.outer.is_empty());
//! ```

mod adjacency;
mod resolver;
mod set;


pub use adjacency::ReverseAdjacency;
pub use resolver::{VariableScopes, resolve_scopes};
pub use set::{EDITING_SENTINEL, ScopeSet, ScopeShape};
