//! Per-document analysis session.
//!
//! A host keeps one [`Analyzer`] per open document and calls
//! [`Analyzer::update`] with the freshly parsed tree on every edit. Each
//! update builds a complete [`DocumentAnalysis`] (definition plus the
//! reverse-adjacency index) before swapping it in, so a validation or
//! completion request issued concurrently always observes a fully built
//! index, never a partial one.
//!
//! All analysis is synchronous and CPU-bound; there is no I/O and no
//! cancellation.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::definition::WorkflowDefinition;
use crate::document::DocNode;
use crate::scope::{ReverseAdjacency, VariableScopes, resolve_scopes};
use crate::validator::{Diagnostic, Validator};

/// Immutable snapshot of everything derived from one version of a document.
#[derive(Debug)]
pub struct DocumentAnalysis {
    definition: WorkflowDefinition,
    adjacency: ReverseAdjacency,
}

impl DocumentAnalysis {
    /// Derives the full analysis from an annotated document tree.
    #[must_use]
    pub fn build(document: &DocNode) -> Self {
        let definition = WorkflowDefinition::from_node(document);
        let adjacency = ReverseAdjacency::build(&definition);
        Self {
            definition,
            adjacency,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    #[must_use]
    pub fn adjacency(&self) -> &ReverseAdjacency {
        &self.adjacency
    }

    /// The variable scopes visible at the state named `id`; empty scopes for
    /// an unknown id.
    #[must_use]
    pub fn scopes_for(&self, id: &str) -> VariableScopes {
        resolve_scopes(&self.definition, &self.adjacency, id)
    }
}

/// Handle for one open document, valid across edits.
pub struct Analyzer {
    current: RwLock<Arc<DocumentAnalysis>>,
    validator: Validator,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// An analyzer over an empty document with the default validator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DocumentAnalysis::build(&DocNode::null()))),
            validator: Validator::new(),
        }
    }

    /// Replaces the validator configuration (schema tables, message catalog,
    /// expression checker).
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Rebuilds the analysis from a new document version and swaps it in
    /// atomically.
    pub fn update(&self, document: &DocNode) {
        let analysis = Arc::new(DocumentAnalysis::build(document));
        *self.current.write() = analysis;
    }

    /// The current analysis. The returned `Arc` stays coherent even if an
    /// update lands while the caller is still using it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DocumentAnalysis> {
        Arc::clone(&self.current.read())
    }

    /// Validates the current document version.
    #[must_use]
    pub fn validate(&self) -> Vec<Diagnostic> {
        self.validator.validate(self.snapshot().definition())
    }

    /// The variable scopes visible at the state named `id` in the current
    /// document version.
    #[must_use]
    pub fn scopes_for(&self, id: &str) -> VariableScopes {
        self.snapshot().scopes_for(id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validator::DiagnosticCode;

    #[test]
    fn update_swaps_the_whole_analysis() {
        let analyzer = Analyzer::new();
        assert!(analyzer.validate().is_empty());

        analyzer.update(&DocNode::from_json(&json!({
            "StartAt": "A",
            "States": {
                "A": {"Type": "Pass", "Next": "B"},
                "B": {"Type": "Pass", "End": true},
                "C": {"Type": "Pass", "End": true}
            }
        })));
        let codes: Vec<_> = analyzer.validate().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::UnreachableState]);

        analyzer.update(&DocNode::from_json(&json!({
            "StartAt": "A",
            "States": {
                "A": {"Type": "Pass", "Assign": {"x": 1}, "Next": "B"},
                "B": {"Type": "Pass", "End": true}
            }
        })));
        assert!(analyzer.validate().is_empty());
        assert!(analyzer.scopes_for("B").local.contains("x"));
    }

    #[test]
    fn snapshot_outlives_a_later_update() {
        let analyzer = Analyzer::new();
        analyzer.update(&DocNode::from_json(&json!({
            "StartAt": "A",
            "States": {"A": {"Type": "Pass", "Assign": {"old": 1}, "Next": "B"},
                       "B": {"Type": "Succeed"}}
        })));
        let before = analyzer.snapshot();
        analyzer.update(&DocNode::from_json(&json!({
            "StartAt": "A",
            "States": {"A": {"Type": "Succeed"}}
        })));
        assert!(before.scopes_for("B").local.contains("old"));
        assert!(analyzer.scopes_for("B").local.is_empty());
    }
}
