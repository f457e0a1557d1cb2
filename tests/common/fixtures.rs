//! Shared fixtures for integration tests.

use serde_json::{Value, json};
use statelens::definition::WorkflowDefinition;
use statelens::document::DocNode;
use statelens::validator::{Diagnostic, DiagnosticCode};

pub fn definition(value: &Value) -> WorkflowDefinition {
    WorkflowDefinition::from_node(&DocNode::from_json(value))
}

pub fn codes(diags: &[Diagnostic]) -> Vec<DiagnosticCode> {
    diags.iter().map(|d| d.code).collect()
}

/// An order-processing pipeline exercising every nesting construct: a Task
/// with Catch, a Choice with per-rule bindings, an Inline Map over items, and
/// a Parallel fan-out.
pub fn order_pipeline() -> Value {
    json!({
        "Comment": "Order processing",
        "StartAt": "LoadOrder",
        "States": {
            "LoadOrder": {
                "Type": "Task",
                "Resource": "arn:aws:states:::lambda:invoke",
                "Assign": {"orderId": "$.id", "lineCount": 0},
                "Catch": [
                    {"ErrorEquals": ["States.ALL"], "Assign": {"loadError": true}, "Next": "Reject"}
                ],
                "Next": "Route"
            },
            "Route": {
                "Type": "Choice",
                "Choices": [
                    {"Variable": "$.total", "NumericGreaterThan": 1000,
                     "Assign": {"priority": "high"}, "Next": "Enrich"},
                    {"Variable": "$.total", "NumericGreaterThan": 0, "Next": "ShipItems"}
                ],
                "Default": "Reject"
            },
            "Enrich": {
                "Type": "Parallel",
                "Branches": [
                    {
                        "StartAt": "CheckFraud",
                        "States": {
                            "CheckFraud": {
                                "Type": "Task",
                                "Resource": "arn:aws:states:::lambda:invoke",
                                "End": true
                            }
                        }
                    },
                    {
                        "StartAt": "ReserveStock",
                        "States": {
                            "ReserveStock": {"Type": "Pass", "Assign": {"reserved": true}, "End": true}
                        }
                    }
                ],
                "Next": "ShipItems"
            },
            "ShipItems": {
                "Type": "Map",
                "ItemsPath": "$.lines",
                "ItemProcessor": {
                    "StartAt": "ShipOne",
                    "States": {
                        "ShipOne": {"Type": "Task",
                                    "Resource": "arn:aws:states:::lambda:invoke",
                                    "Assign": {"lastShipped": "$.sku"},
                                    "Next": "Record"},
                        "Record": {"Type": "Succeed"}
                    }
                },
                "Assign": {"shipped": true},
                "Next": "Done"
            },
            "Done": {"Type": "Succeed"},
            "Reject": {"Type": "Fail", "Error": "OrderRejected", "Cause": "validation failed"}
        }
    })
}
