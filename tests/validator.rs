mod common;
use common::*;

use serde_json::json;
use statelens::validator::{DiagnosticCode, Severity, Validator};

#[test]
fn realistic_pipeline_is_clean() {
    let diags = Validator::new().validate(&definition(&order_pipeline()));
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn dangling_next_is_reported_with_the_target_name() {
    let mut doc = order_pipeline();
    doc["States"]["ShipItems"]["Next"] = json!("Finish");
    let diags = Validator::new().validate(&definition(&doc));
    // The broken edge plus the now-orphaned Done state.
    assert_eq!(
        codes(&diags),
        vec![
            DiagnosticCode::InvalidNext,
            DiagnosticCode::UnreachableState,
        ]
    );
    assert!(diags[0].message.contains("`Finish`"));
    assert!(diags.iter().all(|d| d.severity == Severity::Error));
}

#[test]
fn misspelled_property_is_reported_inside_nested_scopes() {
    let mut doc = order_pipeline();
    doc["States"]["ShipItems"]["ItemProcessor"]["States"]["ShipOne"]["Ressource"] =
        json!("arn:typo");
    let diags = Validator::new().validate(&definition(&doc));
    assert_eq!(codes(&diags), vec![DiagnosticCode::InvalidPropertyName]);
    assert!(diags[0].message.contains("`Ressource`"));
}

#[test]
fn both_processor_generations_together_are_rejected() {
    let mut doc = order_pipeline();
    let processor = doc["States"]["ShipItems"]["ItemProcessor"].clone();
    doc["States"]["ShipItems"]["Iterator"] = processor;
    let diags = Validator::new().validate(&definition(&doc));
    assert_eq!(
        codes(&diags),
        vec![
            DiagnosticCode::MutuallyExclusiveChoiceProperties,
            DiagnosticCode::MutuallyExclusiveChoiceProperties,
        ]
    );
}

#[test]
fn removing_the_terminal_state_is_one_finding_per_scope() {
    let doc = json!({
        "StartAt": "A",
        "States": {
            "A": {"Type": "Pass", "Next": "B"},
            "B": {
                "Type": "Map",
                "ItemProcessor": {
                    "StartAt": "X",
                    "States": {"X": {"Type": "Pass", "Next": "X"}}
                },
                "Next": "A"
            }
        }
    });
    let diags = Validator::new().validate(&definition(&doc));
    let missing_terminal = diags
        .iter()
        .filter(|d| d.code == DiagnosticCode::NoTerminalState)
        .count();
    assert_eq!(missing_terminal, 2, "outer cycle and inner loop: {diags:?}");
}

#[test]
fn diagnostics_serialize_for_editor_transport() {
    let mut doc = order_pipeline();
    doc["StartAt"] = json!("Nowhere");
    let diags = Validator::new().validate(&definition(&doc));
    let wire = serde_json::to_value(&diags).expect("diagnostics serialize");
    assert_eq!(wire[0]["code"], json!("INVALID_START_AT"));
}
