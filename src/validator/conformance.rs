//! Recursive property-schema conformance checking.

use rustc_hash::FxHashSet;

use crate::document::DocNode;
use crate::traversal::MAX_NESTING_DEPTH;

use super::diagnostics::{Diagnostic, DiagnosticCode, MessageCatalog};
use super::schema::{ExpressionChecker, ObjectSchema, SchemaEntry, SchemaRegistry};

/// Bundles the injected configuration the conformance walk needs.
pub(super) struct Conformance<'a> {
    pub registry: &'a SchemaRegistry,
    pub catalog: &'a MessageCatalog,
    pub checker: &'a dyn ExpressionChecker,
}

impl Conformance<'_> {
    /// Checks every declared property of `node` against `schema`, recursing
    /// through composite entries. Non-object nodes conform trivially.
    pub fn check_object(&self, node: &DocNode, schema: &ObjectSchema, diags: &mut Vec<Diagnostic>) {
        self.check_at(node, schema, diags, 0);
    }

    fn check_at(
        &self,
        node: &DocNode,
        schema: &ObjectSchema,
        diags: &mut Vec<Diagnostic>,
        depth: usize,
    ) {
        if depth >= MAX_NESTING_DEPTH {
            return;
        }
        let Some(props) = node.as_object() else {
            return;
        };

        // A group violation flags every contributing property, not only the
        // extras, and suppresses recursion into any of them.
        let mut contested: FxHashSet<usize> = FxHashSet::default();
        for group_id in schema.group_ids() {
            let Some(group) = self.registry.group_schema(group_id) else {
                continue;
            };
            let present: Vec<usize> = props
                .iter()
                .enumerate()
                .filter(|(_, p)| group.contains(&p.key.name))
                .map(|(index, _)| index)
                .collect();
            if present.len() > 1 {
                for &index in &present {
                    let key = &props[index].key;
                    diags.push(Diagnostic::new(
                        key.span,
                        DiagnosticCode::MutuallyExclusiveChoiceProperties,
                        self.catalog.render(
                            DiagnosticCode::MutuallyExclusiveChoiceProperties,
                            Some(&key.name),
                        ),
                    ));
                    contested.insert(index);
                }
            }
        }

        for (index, prop) in props.iter().enumerate() {
            let entry = schema.get(&prop.key.name).or_else(|| {
                schema
                    .group_ids()
                    .iter()
                    .find_map(|id| self.registry.group_schema(id)?.get(&prop.key.name))
            });
            match entry {
                None => diags.push(Diagnostic::new(
                    prop.key.span,
                    DiagnosticCode::InvalidPropertyName,
                    self.catalog
                        .render(DiagnosticCode::InvalidPropertyName, Some(&prop.key.name)),
                )),
                Some(entry) => {
                    if !contested.contains(&index) {
                        self.apply(entry, &prop.value, diags, depth);
                    }
                }
            }
        }
    }

    fn apply(
        &self,
        entry: &SchemaEntry,
        value: &DocNode,
        diags: &mut Vec<Diagnostic>,
        depth: usize,
    ) {
        match entry {
            SchemaEntry::Any => {}
            SchemaEntry::Expr(kind) => {
                if let Some(text) = value.as_str() {
                    if let Some(code) = self.checker.check(*kind, text) {
                        diags.push(Diagnostic::new(
                            value.span,
                            code,
                            self.catalog.render(code, None),
                        ));
                    }
                }
            }
            SchemaEntry::ArrayOf(id) => {
                let (Some(items), Some(schema)) = (value.as_array(), self.registry.schema(id))
                else {
                    return;
                };
                for item in items {
                    self.check_at(item, schema, diags, depth + 1);
                }
            }
            SchemaEntry::ValueOf(id) => {
                if let Some(schema) = self.registry.schema(id) {
                    self.check_at(value, schema, diags, depth + 1);
                }
            }
        }
    }
}
