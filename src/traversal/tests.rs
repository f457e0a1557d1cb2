use serde_json::json;

use crate::definition::WorkflowDefinition;
use crate::document::{DocNode, Property};

use super::*;

fn workflow(value: serde_json::Value) -> WorkflowDefinition {
    WorkflowDefinition::from_node(&DocNode::from_json(&value))
}

/// Top-level chain, a Map sub-workflow, and a two-branch Parallel.
fn nested_fixture() -> WorkflowDefinition {
    workflow(json!({
        "StartAt": "First",
        "States": {
            "First": {"Type": "Pass", "Next": "Mapper"},
            "Mapper": {
                "Type": "Map",
                "ItemProcessor": {
                    "StartAt": "Inner",
                    "States": {
                        "Inner": {"Type": "Pass", "Next": "InnerDone"},
                        "InnerDone": {"Type": "Succeed"}
                    }
                },
                "Next": "Forks"
            },
            "Forks": {
                "Type": "Parallel",
                "Branches": [
                    {"StartAt": "Left", "States": {"Left": {"Type": "Pass", "End": true}}},
                    {"StartAt": "Right", "States": {"Right": {"Type": "Pass", "End": true}}}
                ],
                "End": true
            }
        }
    }))
}

#[test]
fn visit_is_preorder_across_nesting() {
    let wf = nested_fixture();
    let mut order = Vec::new();
    let flow = visit_all_states(&wf, &mut |id, _, _, path| {
        order.push((id.to_string(), path.to_string()));
        Flow::Continue
    });
    assert_eq!(flow, Flow::Continue);
    let expected = vec![
        ("First", "First"),
        ("Mapper", "Mapper"),
        ("Inner", "Mapper/Inner"),
        ("InnerDone", "Mapper/InnerDone"),
        ("Forks", "Forks"),
        ("Left", "Forks/0/Left"),
        ("Right", "Forks/1/Right"),
    ];
    let got: Vec<(&str, &str)> = order
        .iter()
        .map(|(id, path)| (id.as_str(), path.as_str()))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn stop_unwinds_globally_from_inside_a_map() {
    let wf = nested_fixture();
    let mut visited = Vec::new();
    let flow = visit_all_states(&wf, &mut |id, _, _, _| {
        visited.push(id.to_string());
        if id == "Inner" { Flow::Stop } else { Flow::Continue }
    });
    assert_eq!(flow, Flow::Stop);
    // Nothing after "Inner" in preorder: no InnerDone, no Forks, no branches.
    assert_eq!(visited, vec!["First", "Mapper", "Inner"]);
}

#[test]
fn find_prefers_the_current_mapping_over_nested_scopes() {
    // "Dup" exists both at top level and inside the Map; the direct key wins
    // even though the Map state is declared earlier in mapping order.
    let wf = workflow(json!({
        "StartAt": "M",
        "States": {
            "M": {
                "Type": "Map",
                "Iterator": {
                    "StartAt": "Dup",
                    "States": {"Dup": {"Type": "Succeed"}}
                },
                "Next": "Dup"
            },
            "Dup": {"Type": "Pass", "End": true}
        }
    }));
    let located = find_state_by_id(&wf, "Dup", &StatePath::root()).unwrap();
    assert_eq!(located.path.to_string(), "Dup");
    assert!(located.parent_path.is_root());
}

#[test]
fn find_descends_into_maps_and_branches() {
    let wf = nested_fixture();

    let inner = find_state_by_id(&wf, "InnerDone", &StatePath::root()).unwrap();
    assert_eq!(inner.path.to_string(), "Mapper/InnerDone");
    assert_eq!(inner.parent_path.to_string(), "Mapper");
    assert!(inner.parent.state("Inner").is_some());

    let right = find_state_by_id(&wf, "Right", &StatePath::root()).unwrap();
    assert_eq!(right.path.to_string(), "Forks/1/Right");
    assert_eq!(right.parent_path.to_string(), "Forks/1");
}

#[test]
fn find_missing_id_returns_none() {
    let wf = nested_fixture();
    assert!(find_state_by_id(&wf, "Nope", &StatePath::root()).is_none());
}

#[test]
fn state_at_round_trips_located_paths() {
    let wf = nested_fixture();
    for id in ["First", "Mapper", "Inner", "InnerDone", "Forks", "Left", "Right"] {
        let located = find_state_by_id(&wf, id, &StatePath::root()).unwrap();
        let (state, parent) = state_at(&wf, &located.path).unwrap();
        assert_eq!(state, located.state, "state_at disagrees for {id}");
        assert_eq!(parent, located.parent);
    }
}

#[test]
fn all_children_matches_visit_order() {
    let wf = nested_fixture();
    assert_eq!(all_children(&wf, "Mapper"), vec!["Inner", "InnerDone"]);
    assert_eq!(all_children(&wf, "Forks"), vec!["Left", "Right"]);
    assert!(all_children(&wf, "First").is_empty());
    assert!(all_children(&wf, "Nope").is_empty());
}

#[test]
fn direct_next_follows_chaining_rules() {
    let wf = workflow(json!({
        "StartAt": "A",
        "States": {
            "A": {"Type": "Pass", "Next": "C"},
            "C": {
                "Type": "Choice",
                "Choices": [
                    {"Variable": "$.x", "BooleanEquals": true, "Next": "B"}
                ],
                "Default": "D"
            },
            "C2": {
                "Type": "Choice",
                "Choices": [
                    {"Variable": "$.x", "BooleanEquals": true, "Next": "B"}
                ]
            },
            "B": {"Type": "Pass", "End": true},
            "D": {"Type": "Succeed"}
        }
    }));
    let next = |id: &str| {
        direct_next(wf.state(id).unwrap()).map(|reference| reference.target.clone())
    };
    assert_eq!(next("A"), Some("C".into()));
    // Default beats the first rule.
    assert_eq!(next("C"), Some("D".into()));
    // No default: first rule's Next.
    assert_eq!(next("C2"), Some("B".into()));
    // Terminal states chain nowhere.
    assert_eq!(next("B"), None);
    assert_eq!(next("D"), None);
}

#[test]
fn state_names_honors_the_separator_flag() {
    let states = DocNode::object(vec![
        Property::new("Done", DocNode::object(vec![])),
        Property {
            key: crate::document::PropertyKey::new("Typing").without_separator(),
            value: DocNode::null(),
        },
    ]);
    let property = Property::new("States", states);

    let strict = state_names(&property, NameListOptions::default()).unwrap();
    assert_eq!(strict, vec!["Done"]);

    let lenient = state_names(
        &property,
        NameListOptions {
            include_separator_less: true,
        },
    )
    .unwrap();
    assert_eq!(lenient, vec!["Done", "Typing"]);
}

#[test]
fn state_names_rejects_non_states_nodes() {
    let property = Property::new("Branches", DocNode::object(vec![]));
    assert!(matches!(
        state_names(&property, NameListOptions::default()),
        Err(AddressError::NotAStatesProperty { .. })
    ));

    let property = Property::new("States", DocNode::string("not an object"));
    assert!(state_names(&property, NameListOptions::default()).is_err());
}

#[test]
fn nesting_beyond_the_cap_fails_closed() {
    // Build MAX_NESTING_DEPTH + 4 nested Map states; the innermost id must
    // be invisible to both find and visit.
    let mut inner = json!({"StartAt": "Leaf", "States": {"Leaf": {"Type": "Succeed"}}});
    for _ in 0..MAX_NESTING_DEPTH + 4 {
        inner = json!({
            "StartAt": "L",
            "States": {
                "L": {"Type": "Map", "Iterator": inner, "End": true}
            }
        });
    }
    let wf = workflow(inner);
    assert!(find_state_by_id(&wf, "Leaf", &StatePath::root()).is_none());

    let mut saw_leaf = false;
    visit_all_states(&wf, &mut |id, _, _, _| {
        if id == "Leaf" {
            saw_leaf = true;
        }
        Flow::Continue
    });
    assert!(!saw_leaf);
}
