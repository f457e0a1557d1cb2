//! Reachability and structural validation.
//!
//! The validator runs once per nesting scope — the top level, each Map
//! sub-workflow, each Parallel branch — recursively:
//!
//! 1. **Schema conformance**: every declared property of every state is
//!    checked against the injectable [`SchemaRegistry`] tables, including
//!    composite entries (mutually-exclusive groups, array-of-schema,
//!    value-of-schema) and expression-typed fields forwarded to the host's
//!    [`ExpressionChecker`].
//! 2. **Reachability**: a reached-set is seeded from `StartAt` and extended
//!    by every forward edge (`Next`, Choice rules and `Default`, Catch
//!    rules); declared states outside the set are flagged, dangling
//!    references are flagged at their own span, and a scope without a
//!    terminal state gets exactly one finding at its `States` key.
//! 3. **Recursion** into nested scopes with the scope-appropriate workflow
//!    schema variant. Identifiers never cross scope boundaries.
//!
//! The component only accumulates [`Diagnostic`]s; it never fails. Missing
//! structure (no `States`, absent `StartAt`) yields zero diagnostics for
//! the missing part.
//!
//! # Examples
//!
//! ```
//! use statelens::definition::WorkflowDefinition;
//! use statelens::document::DocNode;
//! use statelens::validator::{DiagnosticCode, Validator};
//!
//! let wf = WorkflowDefinition::from_node(&DocNode::from_json(&serde_json::json!({
//!     "StartAt": "A",
//!     "States": {
//!         "A": {"Type": "Pass", "Next": "B"},
//!         "B": {"Type": "Pass", "End": true},
//!         "C": {"Type": "Pass", "End": true}
//!     }
//! })));
//!
//! let diags = Validator::new().validate(&wf);
//! assert_eq!(diags.len(), 1);
//! assert_eq!(diags[0].code, DiagnosticCode::UnreachableState);
//! ```

mod conformance;
mod diagnostics;
mod reachability;
mod schema;


pub use diagnostics::{Diagnostic, DiagnosticCode, MessageCatalog, Severity};
pub use schema::{
    AcceptAllExpressions, ExprKind, ExpressionChecker, ObjectSchema, SchemaEntry, SchemaRegistry,
    WorkflowScope,
};

use crate::definition::WorkflowDefinition;

use conformance::Conformance;

/// The structural validator, carrying its injected configuration.
///
/// Defaults: the shipped ASL schema tables, the default message catalog,
/// and an expression checker that accepts everything.
pub struct Validator {
    registry: SchemaRegistry,
    catalog: MessageCatalog,
    checker: Box<dyn ExpressionChecker + Send + Sync>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::default_asl(),
            catalog: MessageCatalog::default(),
            checker: Box::new(AcceptAllExpressions),
        }
    }

    /// Replaces the schema tables.
    #[must_use]
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the message catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Plugs in a host expression checker for JSONPath/intrinsic fields.
    #[must_use]
    pub fn with_checker(mut self, checker: impl ExpressionChecker + Send + Sync + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    /// Validates the whole document, accumulating diagnostics across every
    /// nesting scope in document order.
    #[must_use]
    pub fn validate(&self, workflow: &WorkflowDefinition) -> Vec<Diagnostic> {
        let conformance = Conformance {
            registry: &self.registry,
            catalog: &self.catalog,
            checker: self.checker.as_ref(),
        };
        let mut diags = Vec::new();
        reachability::check_scope(
            &conformance,
            workflow,
            WorkflowScope::Root,
            &mut diags,
            0,
        );
        tracing::debug!(count = diags.len(), "validation finished");
        diags
    }
}
