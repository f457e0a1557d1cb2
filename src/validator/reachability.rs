//! Per-scope reachability, terminal-state, and reference checks.

use rustc_hash::FxHashSet;

use crate::definition::{EdgeKind, WorkflowDefinition};
use crate::traversal::MAX_NESTING_DEPTH;

use super::conformance::Conformance;
use super::diagnostics::{Diagnostic, DiagnosticCode};
use super::schema::WorkflowScope;

/// Runs the full structural check on one scope, then recurses into every
/// nested scope. Only accumulates diagnostics; never fails.
pub(super) fn check_scope(
    conformance: &Conformance<'_>,
    wf: &WorkflowDefinition,
    scope: WorkflowScope,
    diags: &mut Vec<Diagnostic>,
    depth: usize,
) {
    if depth >= MAX_NESTING_DEPTH {
        return;
    }

    if let Some(schema) = conformance.registry.workflow_schema(scope) {
        conformance.check_object(&wf.raw, schema, diags);
    }

    // No `States` mapping: a valid empty scope, nothing further to check.
    // Reporting the absence is an upstream generic-schema concern.
    let Some(states) = &wf.states else {
        return;
    };
    tracing::debug!(?scope, states = states.len(), "validating scope");

    for entry in &states.entries {
        if let Some(schema) = conformance.registry.state_schema(entry.state.kind) {
            conformance.check_object(&entry.state.raw, schema, diags);
        }
    }

    let mut reached: FxHashSet<&str> = FxHashSet::default();
    if let Some(start) = &wf.start_at {
        if states.contains(&start.target) {
            reached.insert(start.target.as_str());
        } else {
            diags.push(Diagnostic::new(
                start.span,
                DiagnosticCode::InvalidStartAt,
                conformance
                    .catalog
                    .render(DiagnosticCode::InvalidStartAt, Some(&start.target)),
            ));
        }
    }

    for entry in &states.entries {
        for edge in entry.state.outgoing_edges() {
            if states.contains(&edge.reference.target) {
                reached.insert(edge.reference.target.as_str());
            } else {
                let code = match edge.kind {
                    EdgeKind::Default => DiagnosticCode::InvalidDefault,
                    EdgeKind::Next | EdgeKind::Rule(_) | EdgeKind::Catch(_) => {
                        DiagnosticCode::InvalidNext
                    }
                };
                diags.push(Diagnostic::new(
                    edge.reference.span,
                    code,
                    conformance.catalog.render(code, Some(&edge.reference.target)),
                ));
            }
        }
    }

    for entry in &states.entries {
        if !reached.contains(entry.id.as_str()) {
            diags.push(Diagnostic::new(
                entry.id_span,
                DiagnosticCode::UnreachableState,
                conformance
                    .catalog
                    .render(DiagnosticCode::UnreachableState, Some(&entry.id)),
            ));
        }
    }

    if !states.entries.iter().any(|entry| entry.state.is_terminal()) {
        diags.push(Diagnostic::new(
            states.key_span,
            DiagnosticCode::NoTerminalState,
            conformance.catalog.render(DiagnosticCode::NoTerminalState, None),
        ));
    }

    for entry in &states.entries {
        if let Some(processor) = entry.state.processor() {
            check_scope(
                conformance,
                &processor.workflow,
                WorkflowScope::MapProcessor,
                diags,
                depth + 1,
            );
        }
        for branch in entry.state.branches() {
            check_scope(conformance, branch, WorkflowScope::Branch, diags, depth + 1);
        }
    }
}
