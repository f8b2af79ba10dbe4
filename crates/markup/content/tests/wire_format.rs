use markup_core::{
    CalculationIssue, CalculationResult, MarkupStep, OperandError, OperandFormat, OperandRef,
    Operation, SlotAction, StepError,
};
use serde_json::json;

fn step(value: serde_json::Value) -> MarkupStep {
    serde_json::from_value(value).unwrap()
}

fn operand(value: serde_json::Value) -> OperandRef {
    serde_json::from_value(value).unwrap()
}

#[test]
fn reads_flat_record() {
    let step = step(json!({
        "name": "profit",
        "baseIndex": 0,
        "action1": "multiply",
        "operand1": { "kind": "parameter", "key": "profit", "format": "factor" },
        "action2": "add",
        "operand2": { "kind": "literal", "key": "150" },
        "action3": "subtract",
        "operand3": { "kind": "step", "key": -1 }
    }));

    assert_eq!(step.name.as_deref(), Some("profit"));
    assert_eq!(step.base_index, 0);
    assert_eq!(step.slots().len(), 3);
    assert_eq!(
        step.first_operation(),
        Some((
            &SlotAction::Known(Operation::Multiply),
            &OperandRef::factor("profit")
        ))
    );
    assert_eq!(
        step.slot(2).and_then(|s| s.operand.as_ref()),
        Some(&OperandRef::literal(150.0))
    );
    assert_eq!(
        step.slot(3).and_then(|s| s.operand.as_ref()),
        Some(&OperandRef::base_amount())
    );
}

#[test]
fn step_key_may_be_a_numeric_string() {
    assert_eq!(
        operand(json!({ "kind": "step", "key": "-1" })),
        OperandRef::base_amount()
    );
    assert_eq!(
        operand(json!({ "kind": "step", "key": " 2 " })),
        OperandRef::step(2)
    );
    assert_eq!(
        operand(json!({ "kind": "step", "key": 1.0 })),
        OperandRef::step(1)
    );
    assert_eq!(
        operand(json!({ "kind": "literal", "key": "12,5" })),
        OperandRef::literal(12.5)
    );
}

#[test]
fn parameter_format_defaults_to_percent_direct() {
    assert_eq!(
        operand(json!({ "kind": "parameter", "key": "vat" })),
        OperandRef::parameter("vat", OperandFormat::PercentDirect)
    );
    assert_eq!(
        operand(json!({ "kind": "parameter", "key": "vat", "format": "compound" })),
        OperandRef::percent("vat")
    );
    assert_eq!(
        operand(json!({ "kind": "parameter", "key": "vat", "format": "Factor" })),
        OperandRef::factor("vat")
    );
}

#[test]
fn unreadable_operands_load_as_invalid() {
    let cases = [
        (
            json!({ "kind": "formula", "key": "a+b" }),
            OperandError::UnrecognizedKind("formula".into()),
        ),
        (json!({ "key": 3 }), OperandError::UnrecognizedKind(String::new())),
        (json!("margin"), OperandError::UnrecognizedKind(String::new())),
        (
            json!({ "kind": "parameter" }),
            OperandError::MissingKey {
                kind: "parameter".into(),
            },
        ),
        (
            json!({ "kind": "step", "key": 1.5 }),
            OperandError::InvalidKey {
                kind: "step".into(),
                key: "1.5".into(),
            },
        ),
        (
            json!({ "kind": "literal", "key": "lots" }),
            OperandError::InvalidKey {
                kind: "literal".into(),
                key: "lots".into(),
            },
        ),
        (
            json!({ "kind": "parameter", "key": "  " }),
            OperandError::InvalidKey {
                kind: "parameter".into(),
                key: "  ".into(),
            },
        ),
    ];

    for (value, reason) in cases {
        assert_eq!(operand(value), OperandRef::Invalid { reason });
    }
}

#[test]
fn unknown_action_is_kept_by_name() {
    let step = step(json!({
        "baseIndex": -1,
        "action1": "MULTIPLY",
        "operand1": { "kind": "literal", "key": 2 },
        "action2": "modulo",
        "operand2": { "kind": "literal", "key": 3 },
        "action3": 7,
        "operand3": { "kind": "literal", "key": 4 }
    }));

    assert_eq!(
        step.slot(1).and_then(|s| s.action.as_ref()),
        Some(&SlotAction::Known(Operation::Multiply))
    );
    assert_eq!(
        step.slot(2).and_then(|s| s.action.as_ref()),
        Some(&SlotAction::Unrecognized("modulo".into()))
    );
    assert_eq!(
        step.slot(3).and_then(|s| s.action.as_ref()),
        Some(&SlotAction::Unrecognized("7".into()))
    );
}

#[test]
fn trailing_empty_slots_are_dropped() {
    let step = step(json!({
        "baseIndex": -1,
        "action1": "add",
        "operand1": { "kind": "literal", "key": 1 },
        "action2": null,
        "operand2": null,
        "action3": "add",
        "operand3": { "kind": "literal", "key": 2 },
        "action4": null
    }));

    assert_eq!(step.slots().len(), 3);
    assert!(step.slot(2).is_some_and(|s| s.is_empty()));
}

#[test]
fn writes_flat_record() {
    let original = MarkupStep::new(0, Operation::Multiply, OperandRef::factor("margin"))
        .then(Operation::Add, OperandRef::literal(10.0))
        .with_name("profit");

    let value = serde_json::to_value(&original).unwrap();
    assert_eq!(value["baseIndex"], json!(0));
    assert_eq!(value["action1"], json!("multiply"));
    assert_eq!(
        value["operand1"],
        json!({ "kind": "parameter", "key": "margin", "format": "factor" })
    );
    assert_eq!(value["action2"], json!("add"));
    assert_eq!(value["operand2"], json!({ "kind": "literal", "key": 10.0 }));
    assert!(value.get("action3").is_none());

    assert_eq!(step(value), original);
}

#[test]
fn result_serializes_without_empty_errors() {
    let clean = CalculationResult {
        commercial_cost: 1100.0,
        markup_coefficient: 1.1,
        step_results: vec![1100.0],
        errors: None,
    };
    assert_eq!(
        serde_json::to_value(&clean).unwrap(),
        json!({ "commercialCost": 1100.0, "markupCoefficient": 1.1, "stepResults": [1100.0] })
    );

    let failed = CalculationResult {
        errors: Some(vec![CalculationIssue::StepFailed {
            step: 1,
            error: StepError::DivideByZero,
        }]),
        ..clean
    };
    let value = serde_json::to_value(&failed).unwrap();
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        serde_json::from_value::<CalculationResult>(value).unwrap(),
        failed
    );
}
