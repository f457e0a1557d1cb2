//! # Statelens: Semantic Analysis for Amazon States Language
//!
//! Statelens answers two questions an editor keeps asking about an ASL
//! workflow definition: is the state machine structurally sound, and which
//! dynamically bound variables are in scope at a given state.
//!
//! ## Core Concepts
//!
//! - **Document**: an annotated JSON/YAML value tree with source spans,
//!   supplied by the host's parser
//! - **Definition**: the typed state-graph model built from a document
//! - **Traversal**: canonical state addressing and preorder visitation
//!   across Map/Parallel nesting
//! - **Validator**: schema conformance plus reachability analysis, emitting
//!   span-anchored diagnostics
//! - **Scope**: backward data-flow resolution of variable bindings
//!
//! ## Quick Start
//!
//! ### Validating a workflow
//!
//! ```
//! use statelens::analyzer::Analyzer;
//! use statelens::document::DocNode;
//! use statelens::validator::DiagnosticCode;
//!
//! let analyzer = Analyzer::new();
//! analyzer.update(&DocNode::from_json(&serde_json::json!({
//!     "StartAt": "Fetch",
//!     "States": {
//!         "Fetch": {"Type": "Task", "Resource": "arn:example", "Next": "Done"},
//!         "Done": {"Type": "Succeed"},
//!         "Forgotten": {"Type": "Pass", "End": true}
//!     }
//! })));
//!
//! let diags = analyzer.validate();
//! assert_eq!(diags.len(), 1);
//! assert_eq!(diags[0].code, DiagnosticCode::UnreachableState);
//! ```
//!
//! ### Resolving variable scopes
//!
//! ```
//! use statelens::analyzer::Analyzer;
//! use statelens::document::DocNode;
//!
//! let analyzer = Analyzer::new();
//! analyzer.update(&DocNode::from_json(&serde_json::json!({
//!     "StartAt": "Init",
//!     "States": {
//!         "Init": {"Type": "Pass", "Assign": {"attempt": 0}, "Next": "Work"},
//!         "Work": {"Type": "Task", "Resource": "arn:example", "End": true}
//!     }
//! })));
//!
//! let scopes = analyzer.scopes_for("Work");
//! assert!(scopes.local.contains("attempt"));
//! ```
//!
//! ## Module Guide
//!
//! - [`document`] - Annotated value tree with source spans
//! - [`definition`] - State-graph model, kind predicates, edge enumeration
//! - [`traversal`] - State paths, containment search, preorder visitation
//! - [`validator`] - Schema and reachability diagnostics
//! - [`scope`] - Reverse adjacency and variable-scope resolution
//! - [`analyzer`] - Per-document session with atomic rebuild-and-swap
//! - [`telemetry`] - Tracing subscriber bootstrap

pub mod analyzer;
pub mod definition;
pub mod document;
pub mod scope;
pub mod telemetry;
pub mod traversal;
pub mod validator;
