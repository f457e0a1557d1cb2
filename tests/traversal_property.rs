mod common;
use common::*;

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use statelens::scope::{ReverseAdjacency, resolve_scopes};
use statelens::traversal::{Flow, StatePath, find_state_by_id, visit_all_states};
use statelens::validator::{DiagnosticCode, Validator};

/// Distinct state names in declaration order.
fn state_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 2..8)
        .prop_map(|mut names| {
            names.sort();
            names.dedup();
            names
        })
        .prop_filter("need at least two distinct states", |names| {
            names.len() >= 2
        })
}

/// A linear Pass chain; every state binds `v_<name>` on its `Next` edge and
/// the last one terminates the scope.
fn chain(names: &[String]) -> Value {
    let mut states = Map::new();
    for (index, name) in names.iter().enumerate() {
        let mut state = Map::new();
        state.insert("Type".into(), json!("Pass"));
        let mut assign = Map::new();
        assign.insert(format!("v_{name}"), json!(1));
        state.insert("Assign".into(), Value::Object(assign));
        match names.get(index + 1) {
            Some(next) => state.insert("Next".into(), json!(next)),
            None => state.insert("End".into(), json!(true)),
        };
        states.insert(name.clone(), Value::Object(state));
    }
    json!({"StartAt": names[0], "States": Value::Object(states)})
}

/// The chain nested `depth` Inline Maps deep. Wrapper ids carry a hyphen so
/// they can never collide with generated chain names.
fn wrapped(doc: Value, depth: usize) -> Value {
    let mut inner = doc;
    for level in 0..depth {
        let id = format!("wrap-{level}");
        let mut map_state = Map::new();
        map_state.insert("Type".into(), json!("Map"));
        map_state.insert("ItemProcessor".into(), inner);
        map_state.insert("End".into(), json!(true));
        let mut states = Map::new();
        states.insert(id.clone(), Value::Object(map_state));
        inner = json!({"StartAt": id, "States": Value::Object(states)});
    }
    inner
}

proptest! {
    #[test]
    fn prop_visitation_matches_declaration_order(names in state_names_strategy()) {
        let root = definition(&chain(&names));
        let mut visited = Vec::new();
        visit_all_states(&root, &mut |id, _, _, _| {
            visited.push(id.to_string());
            Flow::Continue
        });
        prop_assert_eq!(visited, names);
    }

    #[test]
    fn prop_chains_validate_clean_and_detached_states_are_flagged(
        names in state_names_strategy(),
        detached in 1usize..4,
    ) {
        let mut doc = chain(&names);
        prop_assert!(Validator::new().validate(&definition(&doc)).is_empty());

        // Hyphens cannot appear in generated names, so these never collide.
        let extras: Vec<String> = (0..detached).map(|i| format!("extra-{i}")).collect();
        for extra in &extras {
            doc["States"][extra] = json!({"Type": "Pass", "End": true});
        }
        let diags = Validator::new().validate(&definition(&doc));
        let flagged: Vec<String> = diags
            .iter()
            .filter(|d| d.code == DiagnosticCode::UnreachableState)
            .map(|d| d.message.clone())
            .collect();
        prop_assert_eq!(flagged.len(), extras.len());
        for extra in &extras {
            prop_assert!(flagged.iter().any(|m| m.contains(extra.as_str())));
        }
        prop_assert_eq!(diags.len(), extras.len());
    }

    #[test]
    fn prop_chain_scope_accumulates_every_upstream_binding(names in state_names_strategy()) {
        let root = definition(&chain(&names));
        let adjacency = ReverseAdjacency::build(&root);
        let last = names.last().unwrap();
        let scopes = resolve_scopes(&root, &adjacency, last);
        let expected: Vec<String> = names[..names.len() - 1]
            .iter()
            .map(|name| format!("v_{name}"))
            .collect();
        let mut got: Vec<String> = scopes.local.names().map(str::to_string).collect();
        got.sort();
        let mut expected_sorted = expected;
        expected_sorted.sort();
        prop_assert_eq!(got, expected_sorted);
        prop_assert!(scopes.outer.is_empty());
    }

    #[test]
    fn prop_inline_nesting_never_changes_the_local_scope(
        names in state_names_strategy(),
        depth in 0usize..4,
    ) {
        let flat = definition(&chain(&names));
        let nested = definition(&wrapped(chain(&names), depth));
        let last = names.last().unwrap();

        let flat_scopes =
            resolve_scopes(&flat, &ReverseAdjacency::build(&flat), last);
        let nested_scopes =
            resolve_scopes(&nested, &ReverseAdjacency::build(&nested), last);
        prop_assert_eq!(flat_scopes.local, nested_scopes.local);
        // Nothing binds outside the chain, so inheritance adds nothing.
        prop_assert!(nested_scopes.outer.is_empty());

        let located = find_state_by_id(&nested, last, &StatePath::root()).unwrap();
        prop_assert_eq!(located.path.len(), depth + 1);
    }
}
