//! The state graph model: typed view of an ASL workflow definition.
//!
//! An Amazon States Language document is a tree of graphs: a top-level
//! `States` mapping whose Map states nest one sub-workflow each and whose
//! Parallel states nest one sub-workflow per branch. This module turns the
//! annotated [`DocNode`](crate::document::DocNode) tree into that typed
//! shape:
//!
//! - [`WorkflowDefinition`] — one scope: `StartAt` + `States` mapping
//! - [`State`] — a closed sum over the fixed set of state kinds, with the
//!   kind-specific payload in [`StateBody`]
//! - [`State::outgoing_edges`] — the single source of truth for forward
//!   edges (`Next`, Choice rules, `Default`, Catch rules), shared by the
//!   reachability validator and the variable-scope resolver
//!
//! Construction is lenient by design: a state with a missing or unknown
//! `Type` becomes [`StateKind::Placeholder`], a Map without a processor
//! simply has none, and no constructor ever fails. Reporting structural
//! problems is the validator's job, not the model's.
//!
//! Two schema generations expose the same concepts under different field
//! names (`Iterator` vs `ItemProcessor`, `Parameters` vs `ItemSelector`).
//! The [`Processor`] and [`Selector`] accessors normalize to one canonical
//! view while remembering which literal field was present, so hosts that
//! write edits back can stay in the document's own vocabulary.

mod state;
mod workflow;


pub use state::{
    CatchRule, ChoiceRule, Edge, EdgeKind, MapBody, MapMode, Processor, ProcessorField, Reference,
    Selector, SelectorField, State, StateBody, StateKind,
};
pub use workflow::{StateEntry, StatesMap, WorkflowDefinition};
